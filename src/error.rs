use thiserror::Error;

use crate::constants::STACK_DEPTH;

/// Faults raised by the interpreter.
///
/// None of these are recoverable from inside the machine; a ROM that triggers
/// one is treated as buggy and the host is expected to stop driving it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("stack underflow: returned from a subroutine with an empty call stack")]
    StackUnderflow,

    #[error("stack overflow: call depth exceeded {depth}")]
    StackOverflow { depth: usize },

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("save state is corrupt: {0}")]
    StateCorrupt(String),

    #[error("key {0:#X} is not on the keypad")]
    InvalidKey(u8),
}

impl Chip8Error {
    pub(crate) fn stack_overflow() -> Self {
        Chip8Error::StackOverflow { depth: STACK_DEPTH }
    }
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
