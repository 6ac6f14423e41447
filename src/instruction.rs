use std::fmt;

use crate::opcode::Opcode;

/// A decoded Chip-8 instruction.
///
/// Register operands are register indices (`0x0..=0xF`), immediates are the
/// raw `nn`/`n` fields and addresses the 12-bit `nnn` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    ClearScreen,
    /// `00EE`
    Return,
    /// `0nnn`, a call into host machine code; ignored
    MachineCall(u16),
    /// `1nnn`
    Jump(u16),
    /// `2nnn`
    Call(u16),
    /// `3xnn`
    SkipIfEqual(u8, u8),
    /// `4xnn`
    SkipIfNotEqual(u8, u8),
    /// `5xy0`
    SkipIfRegistersEqual(u8, u8),
    /// `6xnn`
    Load(u8, u8),
    /// `7xnn`
    Add(u8, u8),
    /// `8xy0`
    Move(u8, u8),
    /// `8xy1`
    Or(u8, u8),
    /// `8xy2`
    And(u8, u8),
    /// `8xy3`
    Xor(u8, u8),
    /// `8xy4`
    AddRegisters(u8, u8),
    /// `8xy5`
    Sub(u8, u8),
    /// `8xy6`
    ShiftRight(u8),
    /// `8xy7`
    SubN(u8, u8),
    /// `8xyE`
    ShiftLeft(u8),
    /// `9xy0`
    SkipIfRegistersNotEqual(u8, u8),
    /// `Annn`
    LoadIndex(u16),
    /// `Bnnn`
    JumpOffset(u16),
    /// `Cxnn`
    Random(u8, u8),
    /// `Dxyn`
    Draw(u8, u8, u8),
    /// `Ex9E`
    SkipIfPressed(u8),
    /// `ExA1`
    SkipIfNotPressed(u8),
    /// `Fx07`
    ReadDelay(u8),
    /// `Fx0A`
    WaitKey(u8),
    /// `Fx15`
    SetDelay(u8),
    /// `Fx18`
    SetSound(u8),
    /// `Fx1E`
    AddIndex(u8),
    /// `Fx29`
    LoadGlyph(u8),
    /// `Fx33`
    StoreBcd(u8),
    /// `Fx55`
    StoreRegisters(u8),
    /// `Fx65`
    LoadRegisters(u8),
    /// Any word that isn't part of the Chip-8 instruction set
    Unknown(u16),
}

impl Instruction {
    /// Selects the Instruction for a given Opcode
    pub fn decode(op: u16) -> Self {
        use Instruction::*;

        let (x, y, n) = (op.x(), op.y(), op.n());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x0, ..) => MachineCall(op.nnn()),
            (0x1, ..) => Jump(op.nnn()),
            (0x2, ..) => Call(op.nnn()),
            (0x3, ..) => SkipIfEqual(x, op.nn()),
            (0x4, ..) => SkipIfNotEqual(x, op.nn()),
            (0x5, .., 0x0) => SkipIfRegistersEqual(x, y),
            (0x6, ..) => Load(x, op.nn()),
            (0x7, ..) => Add(x, op.nn()),
            (0x8, .., 0x0) => Move(x, y),
            (0x8, .., 0x1) => Or(x, y),
            (0x8, .., 0x2) => And(x, y),
            (0x8, .., 0x3) => Xor(x, y),
            (0x8, .., 0x4) => AddRegisters(x, y),
            (0x8, .., 0x5) => Sub(x, y),
            (0x8, .., 0x6) => ShiftRight(x),
            (0x8, .., 0x7) => SubN(x, y),
            (0x8, .., 0xE) => ShiftLeft(x),
            (0x9, .., 0x0) => SkipIfRegistersNotEqual(x, y),
            (0xA, ..) => LoadIndex(op.nnn()),
            (0xB, ..) => JumpOffset(op.nnn()),
            (0xC, ..) => Random(x, op.nn()),
            (0xD, ..) => Draw(x, y, n),
            (0xE, _, 0x9, 0xE) => SkipIfPressed(x),
            (0xE, _, 0xA, 0x1) => SkipIfNotPressed(x),
            (0xF, _, 0x0, 0x7) => ReadDelay(x),
            (0xF, _, 0x0, 0xA) => WaitKey(x),
            (0xF, _, 0x1, 0x5) => SetDelay(x),
            (0xF, _, 0x1, 0x8) => SetSound(x),
            (0xF, _, 0x1, 0xE) => AddIndex(x),
            (0xF, _, 0x2, 0x9) => LoadGlyph(x),
            (0xF, _, 0x3, 0x3) => StoreBcd(x),
            (0xF, _, 0x5, 0x5) => StoreRegisters(x),
            (0xF, _, 0x6, 0x5) => LoadRegisters(x),
            _ => Unknown(op),
        }
    }
}

/// Conventional Chip-8 assembly mnemonics
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            MachineCall(nnn) => write!(f, "SYS {:#05X}", nnn),
            Jump(nnn) => write!(f, "JP {:#05X}", nnn),
            Call(nnn) => write!(f, "CALL {:#05X}", nnn),
            SkipIfEqual(x, nn) => write!(f, "SE V{:X}, {:#04X}", x, nn),
            SkipIfNotEqual(x, nn) => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            SkipIfRegistersEqual(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            Load(x, nn) => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Add(x, nn) => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddRegisters(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x) => write!(f, "SHR V{:X}", x),
            SubN(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x) => write!(f, "SHL V{:X}", x),
            SkipIfRegistersNotEqual(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(nnn) => write!(f, "LD I, {:#05X}", nnn),
            JumpOffset(nnn) => write!(f, "JP V0, {:#05X}", nnn),
            Random(x, nn) => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfPressed(x) => write!(f, "SKP V{:X}", x),
            SkipIfNotPressed(x) => write!(f, "SKNP V{:X}", x),
            ReadDelay(x) => write!(f, "LD V{:X}, DT", x),
            WaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            LoadGlyph(x) => write!(f, "LD F, V{:X}", x),
            StoreBcd(x) => write!(f, "LD B, V{:X}", x),
            StoreRegisters(x) => write!(f, "LD [I], V{:X}", x),
            LoadRegisters(x) => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "DW {:#06X}", op),
        }
    }
}
