/// Total addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;

/// Address where programs are loaded and execution begins
pub const PROGRAM_START: u16 = 0x200;

/// Largest program that fits between `PROGRAM_START` and the end of memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Address of the first glyph of the built-in font
pub const FONT_START: u16 = 0x50;

/// Bytes per font glyph
pub const GLYPH_SIZE: u16 = 5;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of nested subroutine calls before a CALL faults
pub const STACK_DEPTH: usize = 16;

pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;

/// Instructions executed per 1/60 s frame unless configured otherwise
pub const DEFAULT_CYCLES_PER_FRAME: usize = 10;

/// Frames per second the host is expected to drive the machine at
pub const FRAME_RATE: u32 = 60;

/// # Sprite Sheet
/// Glyphs for the hexadecimal digits 0..F, five rows of four pixels each.
///
/// ```text
/// "0"   Binary   Hex
/// ****  11110000 0xF0
/// *  *  10010000 0x90
/// *  *  10010000 0x90
/// *  *  10010000 0x90
/// ****  11110000 0xF0
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
