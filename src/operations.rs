use rand::RngCore;

use crate::constants::{FONT_START, GLYPH_SIZE, KEY_COUNT};
use crate::error::Result;
use crate::frame::{self, BLANK_FRAME};
use crate::instruction::Instruction;
use crate::state::State;

/// Applies a decoded instruction to the state.
///
/// The pc must already point past the instruction; jumps, calls and skips
/// adjust it from there. An instruction that faults leaves everything except
/// the pc untouched.
pub fn execute(instruction: Instruction, state: &mut State, rng: &mut dyn RngCore) -> Result<()> {
    use Instruction::*;

    match instruction {
        ClearScreen => clr(state),
        Return => state.pc = state.pop()?,
        MachineCall(_) => {}
        Jump(nnn) => state.pc = nnn,
        Call(nnn) => {
            state.push(state.pc)?;
            state.pc = nnn;
        }
        SkipIfEqual(x, nn) => skip_if(&mut state.pc, state.v[x as usize] == nn),
        SkipIfNotEqual(x, nn) => skip_if(&mut state.pc, state.v[x as usize] != nn),
        SkipIfRegistersEqual(x, y) => {
            skip_if(&mut state.pc, state.v[x as usize] == state.v[y as usize])
        }
        SkipIfRegistersNotEqual(x, y) => {
            skip_if(&mut state.pc, state.v[x as usize] != state.v[y as usize])
        }
        Load(x, nn) => state.v[x as usize] = nn,
        Add(x, nn) => state.v[x as usize] = state.v[x as usize].wrapping_add(nn),
        Move(x, y) => state.v[x as usize] = state.v[y as usize],
        Or(x, y) => state.v[x as usize] |= state.v[y as usize],
        And(x, y) => state.v[x as usize] &= state.v[y as usize],
        Xor(x, y) => state.v[x as usize] ^= state.v[y as usize],
        AddRegisters(x, y) => add(state, x, y),
        Sub(x, y) => sub(state, x, x, y),
        ShiftRight(x) => shr(state, x),
        SubN(x, y) => sub(state, x, y, x),
        ShiftLeft(x) => shl(state, x),
        LoadIndex(nnn) => state.i = nnn,
        JumpOffset(nnn) => state.pc = nnn + u16::from(state.v[0x0]),
        Random(x, nn) => state.v[x as usize] = (rng.next_u32() as u8) & nn,
        Draw(x, y, n) => draw(state, x, y, n)?,
        SkipIfPressed(x) => {
            skip_if(&mut state.pc, key_pressed(&state.keys, state.v[x as usize]))
        }
        SkipIfNotPressed(x) => {
            skip_if(&mut state.pc, !key_pressed(&state.keys, state.v[x as usize]))
        }
        ReadDelay(x) => state.v[x as usize] = state.delay_timer,
        WaitKey(x) => state.awaiting_key = Some(x),
        SetDelay(x) => state.delay_timer = state.v[x as usize],
        SetSound(x) => state.sound_timer = state.v[x as usize],
        AddIndex(x) => state.i = (state.i + u16::from(state.v[x as usize])) & 0x0FFF,
        LoadGlyph(x) => state.i = FONT_START + u16::from(state.v[x as usize]) * GLYPH_SIZE,
        StoreBcd(x) => bcd(state, x)?,
        StoreRegisters(x) => stor(state, x)?,
        LoadRegisters(x) => read(state, x)?,
        Unknown(op) => {
            log::warn!("ignoring unknown opcode {:#06X} at {:#05X}", op, state.pc - 2)
        }
    }
    Ok(())
}

/// clear
fn clr(state: &mut State) {
    state.frame_buffer = BLANK_FRAME;
    state.draw_flag = true;
}

/// if condition then pc += 2
fn skip_if(pc: &mut u16, condition: bool) {
    if condition {
        *pc += 0x2;
    }
}

/// Vx += Vy; VF = overflow
fn add(state: &mut State, x: u8, y: u8) {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[0xF] = over as u8;
    state.v[x as usize] = res;
}

/// Vx = Va - Vb; VF = !underflow
fn sub(state: &mut State, x: u8, a: u8, b: u8) {
    let (res, under) = state.v[a as usize].overflowing_sub(state.v[b as usize]);
    state.v[0xF] = !under as u8;
    state.v[x as usize] = res;
}

/// Vx >>= 1; VF = shifted out bit
fn shr(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    state.v[0xF] = vx & 0x1;
    state.v[x as usize] = vx >> 1;
}

/// Vx <<= 1; VF = shifted out bit
fn shl(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    state.v[0xF] = vx >> 7;
    state.v[x as usize] = vx << 1;
}

/// Only the low nibble of a register names a key
fn key_pressed(keys: &[bool; KEY_COUNT], key: u8) -> bool {
    keys[(key & 0xF) as usize]
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite at memory i..i+n onto the FrameBuffer.
/// Sets VF if any pixels were erased
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<()> {
    let mut sprite = [0; 0xF];
    let height = n as usize;
    sprite[..height].copy_from_slice(state.read(state.i as usize, height)?);

    // Coordinates are read before VF is overwritten by the collision flag
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    let collision = frame::draw_sprite(&mut state.frame_buffer, &sprite[..height], vx, vy);
    state.v[0xF] = collision as u8;
    state.draw_flag = true;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: u8) -> Result<()> {
    let vx = state.v[x as usize];
    let digits = [vx / 100 % 10, vx / 10 % 10, vx % 10];
    state.read_mut(state.i as usize, 3)?.copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: u8) -> Result<()> {
    let count = x as usize + 1;
    let v = state.v;
    state
        .read_mut(state.i as usize, count)?
        .copy_from_slice(&v[..count]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: u8) -> Result<()> {
    let count = x as usize + 1;
    let mut loaded = [0; 0x10];
    loaded[..count].copy_from_slice(state.read(state.i as usize, count)?);
    state.v[..count].copy_from_slice(&loaded[..count]);
    Ok(())
}
