pub use crate::chip8::{Chip8, Config, KeyWaitMode, StepOutcome};
pub use constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_RATE};
pub use error::{Chip8Error, Result};
pub use frame::FrameBuffer;
pub use instruction::Instruction;
pub use state::State;

mod chip8;
pub mod constants;
mod error;
pub mod frame;
mod instruction;
mod opcode;
mod operations;
pub mod savestate;
mod state;
