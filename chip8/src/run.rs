use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use sdl2::event::Event;

use chip8vm::{Chip8, Config, FRAME_RATE};
use chip8vm_display::Display;

use crate::keymap::{command, keymap, Command};

/// Everything the frontend needs to start a session
pub struct Settings {
    pub rom: PathBuf,
    /// Where F5 writes and F9 reads save states
    pub state_path: PathBuf,
    /// Save state restored right after the ROM is loaded
    pub resume: Option<PathBuf>,
    pub scale: u32,
    pub config: Config,
}

pub fn run(settings: Settings) -> Result<()> {
    let rom = fs::read(&settings.rom)
        .with_context(|| format!("unable to read ROM {}", settings.rom.display()))?;

    let mut chip8 = Chip8::with_config(settings.config.clone());
    chip8.load_program(&rom)?;
    log::info!("loaded {}", settings.rom.display());

    if let Some(path) = &settings.resume {
        let blob =
            fs::read(path).with_context(|| format!("unable to read state {}", path.display()))?;
        chip8.load_state(&blob)?;
        log::info!("resumed from {}", path.display());
    }

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, "chip8vm", settings.scale).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    let frame_time = Duration::from_secs(1) / FRAME_RATE;

    // Whether frames should run back to back instead of at FRAME_RATE
    let mut fast_forward = false;
    // Set once the machine faults; cleared by a reset or a restored state
    let mut halted = false;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match (keymap(key), command(key)) {
                    (Some(kc), _) => chip8.key_press(kc)?,
                    (_, Some(Command::Quit)) => break 'event,
                    (_, Some(Command::FastForward)) => fast_forward = true,
                    (_, Some(Command::SaveState)) => save_state(&chip8, &settings.state_path),
                    (_, Some(Command::LoadState)) => {
                        if load_state(&mut chip8, &settings.state_path) {
                            halted = false;
                        }
                    }
                    (_, Some(Command::Reset)) => {
                        chip8.load_program(&rom)?;
                        halted = false;
                        log::info!("reset");
                    }
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (keymap(key), command(key)) {
                    (Some(kc), _) => chip8.key_release(kc)?,
                    (_, Some(Command::FastForward)) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if !halted {
            if let Err(e) = chip8.run_frame() {
                log::error!("machine halted at {:#05X}: {}", chip8.state().pc, e);
                halted = true;
            }
        }

        if let Some(frame) = chip8.take_frame() {
            display.render(frame).map_err(|e| anyhow!(e))?;
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    Ok(())
}

fn save_state(chip8: &Chip8, path: &Path) {
    match fs::write(path, chip8.save_state()) {
        Ok(()) => log::info!("saved state to {}", path.display()),
        Err(e) => log::error!("unable to save state to {}: {}", path.display(), e),
    }
}

/// Returns whether the machine now holds the restored state
fn load_state(chip8: &mut Chip8, path: &Path) -> bool {
    let restored = fs::read(path)
        .map_err(anyhow::Error::from)
        .and_then(|blob| chip8.load_state(&blob).map_err(anyhow::Error::from));
    match restored {
        Ok(()) => {
            log::info!("restored state from {}", path.display());
            true
        }
        Err(e) => {
            log::error!("unable to restore state from {}: {}", path.display(), e);
            false
        }
    }
}
