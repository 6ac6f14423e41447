use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]; `true` is a lit pixel
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

pub const BLANK_FRAME: FrameBuffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// XORs an 8-pixel-wide sprite onto the frame with its top left corner at (x, y).
///
/// Each byte of `sprite` is one row, most significant bit leftmost. Pixels that
/// fall off the right or bottom edge wrap around to the opposite side.
///
/// Returns whether any lit pixel was turned off.
pub fn draw_sprite(frame: &mut FrameBuffer, sprite: &[u8], x: u8, y: u8) -> bool {
    let mut collision = false;

    for (row, byte) in sprite.iter().enumerate() {
        let py = (y as usize + row) % DISPLAY_HEIGHT;
        for col in 0..8 {
            if byte & (0x80 >> col) == 0 {
                continue;
            }
            let px = (x as usize + col) % DISPLAY_WIDTH;
            let pixel = &mut frame[py][px];
            collision |= *pixel;
            *pixel = !*pixel;
        }
    }

    collision
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(frame: &FrameBuffer) -> Vec<(usize, usize)> {
        let mut pixels = Vec::new();
        for (y, row) in frame.iter().enumerate() {
            for (x, &pixel) in row.iter().enumerate() {
                if pixel {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    #[test]
    fn test_draws_exactly_the_sprite_pixels() {
        let mut frame = BLANK_FRAME;
        let collision = draw_sprite(&mut frame, &[0b1010_0000, 0b0100_0000], 2, 3);
        assert!(!collision);
        assert_eq!(lit(&frame), vec![(2, 3), (4, 3), (3, 4)]);
    }

    #[test]
    fn test_redraw_erases_and_collides() {
        let mut frame = BLANK_FRAME;
        let sprite = [0xF0, 0x90, 0x90, 0x90, 0xF0];
        assert!(!draw_sprite(&mut frame, &sprite, 10, 10));
        assert!(draw_sprite(&mut frame, &sprite, 10, 10));
        assert_eq!(frame, BLANK_FRAME);
    }

    #[test]
    fn test_xors_against_existing_pixels() {
        let mut frame = BLANK_FRAME;
        // 0 1 0 1 -> Set
        frame[0][2..6].copy_from_slice(&[false, true, false, true]);
        // 1 1 0 0 -> Draw xor
        let collision = draw_sprite(&mut frame, &[0b1100_0000], 2, 0);
        assert!(collision);
        assert_eq!(frame[0][2..6], [true, false, false, true]);
    }

    #[test]
    fn test_wraps_at_bottom_right_corner() {
        let mut frame = BLANK_FRAME;
        draw_sprite(&mut frame, &[0xFF], 63, 31);
        let expected: Vec<(usize, usize)> = vec![
            (0, 31),
            (1, 31),
            (2, 31),
            (3, 31),
            (4, 31),
            (5, 31),
            (6, 31),
            (63, 31),
        ];
        assert_eq!(lit(&frame), expected);
    }

    #[test]
    fn test_wraps_rows_vertically() {
        let mut frame = BLANK_FRAME;
        draw_sprite(&mut frame, &[0x80, 0x80], 0, 31);
        assert_eq!(lit(&frame), vec![(0, 0), (0, 31)]);
    }

    #[test]
    fn test_collision_is_not_reset_per_row() {
        let mut frame = BLANK_FRAME;
        frame[0][0] = true;
        // collides on the first row only
        assert!(draw_sprite(&mut frame, &[0x80, 0x80], 0, 0));
    }
}
