use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use chip8vm::constants::DEFAULT_CYCLES_PER_FRAME;
use chip8vm::{Config, KeyWaitMode};

use crate::run::{run, Settings};

mod keymap;
mod run;

/// Runs a CHIP-8 ROM in an SDL window
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per 60 Hz frame
    #[arg(short, long, default_value_t = DEFAULT_CYCLES_PER_FRAME)]
    cycles_per_frame: usize,

    /// Size in screen pixels of one CHIP-8 pixel
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Make Fx0A record the register without blocking
    #[arg(long)]
    reference_key_wait: bool,

    /// Save state to restore before running
    #[arg(long)]
    state: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let key_wait = if args.reference_key_wait {
        KeyWaitMode::Reference
    } else {
        KeyWaitMode::Blocking
    };

    let settings = Settings {
        state_path: args.rom.with_extension("sav"),
        rom: args.rom,
        resume: args.state,
        scale: args.scale,
        config: Config {
            cycles_per_frame: args.cycles_per_frame,
            key_wait,
            rng_seed: args.seed,
        },
    };
    run(settings)
}
