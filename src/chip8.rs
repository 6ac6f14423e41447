use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{DEFAULT_CYCLES_PER_FRAME, KEY_COUNT, MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::error::{Chip8Error, Result};
use crate::frame::FrameBuffer;
use crate::instruction::Instruction;
use crate::operations;
use crate::savestate;
use crate::state::State;

/// How `Fx0A` (wait for a key press) behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWaitMode {
    /// Execution halts on `Fx0A` until a key is pressed; the key lands in Vx
    Blocking,
    /// `Fx0A` only records the register and execution carries straight on
    Reference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed by each call to `run_frame`
    pub cycles_per_frame: usize,
    pub key_wait: KeyWaitMode,
    /// Seed for `Cxnn`; seeded from the OS when unset
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cycles_per_frame: DEFAULT_CYCLES_PER_FRAME,
            key_wait: KeyWaitMode::Blocking,
            rng_seed: None,
        }
    }
}

/// What a call to `step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Executed(Instruction),
    /// Nothing ran; the machine is blocked on `Fx0A`
    AwaitingKey,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the random source behind `Cxnn`
///  - its `config`
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - advancing the CPU one instruction or one frame at a time
/// - inspecting its frame buffer for rendering by some display
/// - saving and restoring its complete state
///
/// Timers count down once per executed instruction, so their real-time rate
/// follows `cycles_per_frame`.
pub struct Chip8 {
    state: State,
    rng: StdRng,
    config: Config,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Chip8 {
            state: State::new(),
            rng: seed_rng(config.rng_seed),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only view of the whole machine
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the machine to power-on state: blank memory except the font,
    /// pc at 0x200 and the random source reseeded.
    pub fn reset(&mut self) {
        log::debug!("resetting machine");
        self.state = State::new();
        self.rng = seed_rng(self.config.rng_seed);
    }

    /// Resets the machine and copies a program into memory at 0x200.
    ///
    /// # Arguments
    /// * `program` the raw ROM image, at most 3584 bytes
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        self.reset();
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        log::debug!("loaded {} byte program", program.len());
        Ok(())
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether the frame changed since it was last taken
    pub fn is_dirty(&self) -> bool {
        self.state.draw_flag
    }

    /// Returns the FrameBuffer if the display should be redrawn and marks it clean
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// In blocking mode this also completes a pending `Fx0A`.
    ///
    /// # Arguments
    /// * `key` the keypad value 0x0..=0xF that was pressed
    pub fn key_press(&mut self, key: u8) -> Result<()> {
        check_key(key)?;
        self.state.keys[key as usize] = true;
        if self.config.key_wait == KeyWaitMode::Blocking {
            if let Some(register) = self.state.awaiting_key.take() {
                log::debug!("key {:X} resumes execution into V{:X}", key, register);
                self.state.v[register as usize] = key;
            }
        }
        Ok(())
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad value 0x0..=0xF that was released
    pub fn key_release(&mut self, key: u8) -> Result<()> {
        check_key(key)?;
        self.state.keys[key as usize] = false;
        Ok(())
    }

    /// Whether `step` is currently a no-op waiting on `key_press`
    pub fn is_awaiting_key(&self) -> bool {
        self.config.key_wait == KeyWaitMode::Blocking && self.state.awaiting_key.is_some()
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Advances the CPU by a single cycle
    /// - does nothing while awaiting a keypress
    /// - fetches, decodes and executes the next opcode
    /// - counts the timers down
    ///
    /// On a fault the pc is left on the faulting instruction.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.is_awaiting_key() {
            return Ok(StepOutcome::AwaitingKey);
        }

        let pc = self.state.pc;
        let op = self.state.fetch()?;
        let instruction = Instruction::decode(op);
        log::trace!(
            "{:04X} {:04X} {:<16} i{:04X} v{:02X?}",
            pc,
            op,
            instruction.to_string(),
            self.state.i,
            self.state.v
        );

        self.state.pc += 0x2;
        if let Err(e) = operations::execute(instruction, &mut self.state, &mut self.rng) {
            self.state.pc = pc;
            return Err(e);
        }
        self.state.tick_timers();

        Ok(StepOutcome::Executed(instruction))
    }

    /// Runs `cycles_per_frame` instructions, stopping early if the machine
    /// blocks on a key press. Returns how many instructions ran.
    pub fn run_frame(&mut self) -> Result<usize> {
        let mut executed = 0;
        for _ in 0..self.config.cycles_per_frame {
            match self.step()? {
                StepOutcome::Executed(_) => executed += 1,
                StepOutcome::AwaitingKey => break,
            }
        }
        Ok(executed)
    }

    /// Captures the complete machine state as an opaque blob
    pub fn save_state(&self) -> Vec<u8> {
        log::debug!("saving state at pc {:04X}", self.state.pc);
        savestate::serialize(&self.state)
    }

    /// Restores a blob produced by `save_state`.
    ///
    /// A corrupt blob leaves the machine untouched.
    pub fn load_state(&mut self, blob: &[u8]) -> Result<()> {
        self.state = savestate::deserialize(blob)?;
        log::debug!("restored state at pc {:04X}", self.state.pc);
        Ok(())
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn check_key(key: u8) -> Result<()> {
    if key as usize >= KEY_COUNT {
        return Err(Chip8Error::InvalidKey(key));
    }
    Ok(())
}
