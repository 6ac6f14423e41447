//! Save state serialization for complete machine state capture.
//!
//! ## Binary Format
//!
//! Every field is fixed size, so a save state is always `SAVESTATE_SIZE` bytes.
//! Multi-byte values are little-endian.
//!
//! - 4 bytes: magic number "CH8S"
//! - 4 bytes: format version (u32)
//! - 4096 bytes: memory
//! - 16 bytes: V0..VF
//! - 2 bytes: I
//! - 2 bytes: pc
//! - 1 byte: stack pointer
//! - 32 bytes: stack, 16 return addresses
//! - 1 byte each: delay timer, sound timer
//! - 256 bytes: frame buffer, one bit per pixel, rows top to bottom, leftmost pixel in the high bit
//! - 2 bytes: key latch, bit k set when key k is held
//! - 1 byte: register awaiting a key press, `0xFF` when none
//!
//! The draw flag is not stored; restoring always marks the frame as changed.

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MEMORY_SIZE, REGISTER_COUNT, STACK_DEPTH,
};
use crate::error::{Chip8Error, Result};
use crate::state::State;

/// Current save state format version.
///
/// Increment this when making breaking changes to the format.
pub const SAVESTATE_VERSION: u32 = 1;

/// Magic number for save state files ("CH8S" in ASCII).
pub const SAVESTATE_MAGIC: [u8; 4] = [b'C', b'H', b'8', b'S'];

const FRAME_BYTES: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT / 8;
const NO_KEY_AWAITED: u8 = 0xFF;

/// Size in bytes of every save state.
pub const SAVESTATE_SIZE: usize = 4
    + 4
    + MEMORY_SIZE
    + REGISTER_COUNT
    + 2
    + 2
    + 1
    + STACK_DEPTH * 2
    + 1
    + 1
    + FRAME_BYTES
    + 2
    + 1;

/// Serializes every field of the state into a save state blob.
pub fn serialize(state: &State) -> Vec<u8> {
    let mut out = Vec::with_capacity(SAVESTATE_SIZE);

    out.extend_from_slice(&SAVESTATE_MAGIC);
    out.extend_from_slice(&SAVESTATE_VERSION.to_le_bytes());
    out.extend_from_slice(&state.memory);
    out.extend_from_slice(&state.v);
    out.extend_from_slice(&state.i.to_le_bytes());
    out.extend_from_slice(&state.pc.to_le_bytes());
    out.push(state.sp);
    for addr in state.stack.iter() {
        out.extend_from_slice(&addr.to_le_bytes());
    }
    out.push(state.delay_timer);
    out.push(state.sound_timer);
    for row in state.frame_buffer.iter() {
        for pixels in row.chunks(8) {
            let byte = pixels
                .iter()
                .fold(0u8, |byte, &pixel| byte << 1 | pixel as u8);
            out.push(byte);
        }
    }
    let keys = state
        .keys
        .iter()
        .enumerate()
        .fold(0u16, |mask, (key, &held)| mask | (held as u16) << key);
    out.extend_from_slice(&keys.to_le_bytes());
    out.push(state.awaiting_key.unwrap_or(NO_KEY_AWAITED));

    debug_assert_eq!(out.len(), SAVESTATE_SIZE);
    out
}

/// Rebuilds a state from a save state blob.
///
/// The blob is fully validated before anything is returned, so a corrupt blob
/// can never yield a partially restored state.
pub fn deserialize(bytes: &[u8]) -> Result<State> {
    if bytes.len() != SAVESTATE_SIZE {
        return Err(corrupt(format!(
            "expected {} bytes but got {}",
            SAVESTATE_SIZE,
            bytes.len()
        )));
    }

    let mut reader = Reader { bytes, offset: 0 };

    if reader.take(4) != SAVESTATE_MAGIC {
        return Err(corrupt("bad magic number"));
    }
    let version = reader.u32();
    if version != SAVESTATE_VERSION {
        return Err(corrupt(format!("unsupported version {}", version)));
    }

    let mut state = State::new();
    state.memory.copy_from_slice(reader.take(MEMORY_SIZE));
    state.v.copy_from_slice(reader.take(REGISTER_COUNT));

    state.i = reader.u16();
    if state.i > 0x0FFF {
        return Err(corrupt(format!(
            "index register {:#06X} out of range",
            state.i
        )));
    }
    state.pc = reader.u16();

    state.sp = reader.u8();
    if state.sp as usize > STACK_DEPTH {
        return Err(corrupt(format!("stack pointer {} out of range", state.sp)));
    }
    for addr in state.stack.iter_mut() {
        *addr = reader.u16();
    }

    state.delay_timer = reader.u8();
    state.sound_timer = reader.u8();

    for row in state.frame_buffer.iter_mut() {
        for pixels in row.chunks_mut(8) {
            let byte = reader.u8();
            for (bit, pixel) in pixels.iter_mut().enumerate() {
                *pixel = byte & (0x80 >> bit) != 0;
            }
        }
    }

    let keys = reader.u16();
    for (key, held) in state.keys.iter_mut().enumerate() {
        *held = keys & (1 << key) != 0;
    }

    state.awaiting_key = match reader.u8() {
        NO_KEY_AWAITED => None,
        register if (register as usize) < KEY_COUNT => Some(register),
        other => {
            return Err(corrupt(format!(
                "awaiting register {:#04X} out of range",
                other
            )))
        }
    };

    state.draw_flag = true;
    Ok(state)
}

fn corrupt(reason: impl Into<String>) -> Chip8Error {
    Chip8Error::StateCorrupt(reason.into())
}

/// Cursor over a blob whose length has already been checked
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> &'a [u8] {
        let bytes = self.bytes;
        let slice = &bytes[self.offset..self.offset + len];
        self.offset += len;
        slice
    }

    fn u8(&mut self) -> u8 {
        self.take(1)[0]
    }

    fn u16(&mut self) -> u16 {
        let b = self.take(2);
        u16::from_le_bytes([b[0], b[1]])
    }

    fn u32(&mut self) -> u32 {
        let b = self.take(4);
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }
}
