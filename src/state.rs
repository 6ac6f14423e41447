use crate::constants::{
    FONT_START, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET, STACK_DEPTH,
};
use crate::error::{Chip8Error, Result};
use crate::frame::{FrameBuffer, BLANK_FRAME};

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register, kept within 0x000..=0xFFF
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - both count down once per executed instruction while nonzero
///
/// ## Memory
/// - a 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the font
///     - 0x200.. holds the program
/// - 32x64 frame buffer and the flag marking it as changed since the last render
///
/// ## Input
/// - the pressed status of keys 0..F
/// - the register, if any, that an `Fx0A` instruction is waiting to fill
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keys: [bool; KEY_COUNT],
    pub awaiting_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: BLANK_FRAME,
            draw_flag: false,
            keys: [false; KEY_COUNT],
            awaiting_key: None,
        }
    }

    /// Borrows `len` bytes of memory starting at `addr`.
    pub fn read(&self, addr: usize, len: usize) -> Result<&[u8]> {
        check_bounds(addr, len)?;
        Ok(&self.memory[addr..addr + len])
    }

    /// Mutably borrows `len` bytes of memory starting at `addr`.
    pub fn read_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        check_bounds(addr, len)?;
        Ok(&mut self.memory[addr..addr + len])
    }

    /// Reads the opcode the pc points at.
    pub fn fetch(&self) -> Result<u16> {
        let bytes = self.read(self.pc as usize, 2)?;
        Ok(crate::opcode::from_bytes(bytes[0], bytes[1]))
    }

    /// The live part of the call stack, oldest return address first.
    pub fn call_stack(&self) -> &[u16] {
        &self.stack[..self.sp as usize]
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.sp as usize >= STACK_DEPTH {
            return Err(Chip8Error::stack_overflow());
        }
        self.stack[self.sp as usize] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Decrements both timers, stopping at zero
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Faults with the first address past the end of memory that `addr..addr + len` would touch
fn check_bounds(addr: usize, len: usize) -> Result<()> {
    if addr + len > MEMORY_SIZE {
        let address = addr.max(MEMORY_SIZE);
        return Err(Chip8Error::MemoryOutOfBounds { address });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_loads_font_at_0x50() {
        let state = State::new();
        assert_eq!(state.memory[0x50..0xA0], SPRITE_SHEET[..]);
        assert!(state.memory[..0x50].iter().all(|&b| b == 0));
        assert!(state.memory[0xA0..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_state_starts_at_program() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert!(state.call_stack().is_empty());
        assert_eq!(state.awaiting_key, None);
        assert!(!state.draw_flag);
    }

    #[test]
    fn test_fetches_big_endian() {
        let mut state = State::new();
        state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(state.fetch(), Ok(0xAABB));
    }

    #[test]
    fn test_fetch_past_end_of_memory_faults() {
        let mut state = State::new();
        state.pc = 0xFFF;
        assert_eq!(
            state.fetch(),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        );
        state.pc = 0xFFE;
        assert!(state.fetch().is_ok());
    }

    #[test]
    fn test_read_reports_first_out_of_range_address() {
        let state = State::new();
        assert_eq!(
            state.read(0x1004, 1),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1004 })
        );
        assert!(state.read(0xFFD, 3).is_ok());
    }

    #[test]
    fn test_stack_is_last_in_first_out() {
        let mut state = State::new();
        state.push(0x202).unwrap();
        state.push(0x304).unwrap();
        assert_eq!(state.call_stack(), &[0x202, 0x304]);
        assert_eq!(state.pop(), Ok(0x304));
        assert_eq!(state.pop(), Ok(0x202));
        assert_eq!(state.pop(), Err(Chip8Error::StackUnderflow));
    }

    #[test]
    fn test_stack_overflows_past_depth() {
        let mut state = State::new();
        for addr in 0..STACK_DEPTH as u16 {
            state.push(addr).unwrap();
        }
        assert_eq!(
            state.push(0xABC),
            Err(Chip8Error::StackOverflow { depth: STACK_DEPTH })
        );
        assert_eq!(state.sp as usize, STACK_DEPTH);
    }

    #[test]
    fn test_timers_floor_at_zero() {
        let mut state = State::new();
        state.delay_timer = 1;
        state.tick_timers();
        state.tick_timers();
        assert_eq!((state.delay_timer, state.sound_timer), (0, 0));
    }
}
