//! In-memory framebuffer for the 128x64 panel.

use crate::{
    glyph::{GLYPH_ROWS, GlyphSource, GlyphWidth},
    protocol::{BUFFER_SIZE, HEIGHT, LINE_BYTES, WIDTH},
};

/// 1bpp framebuffer for the panel.
///
/// Bit mapping within one row byte: bit 7 is the first pixel in that byte.
/// Writes outside the panel are dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit = self.bytes.iter().map(|b| b.count_ones()).sum::<u32>();
        f.debug_struct("FrameBuffer").field("lit_pixels", &lit).finish()
    }
}

impl FrameBuffer {
    /// Creates a new blank framebuffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    /// Returns the underlying framebuffer bytes.
    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Fills the whole framebuffer with one pixel state.
    pub fn fill(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    /// Copies another framebuffer into this one.
    pub fn copy_from(&mut self, other: &FrameBuffer) {
        self.bytes.copy_from_slice(&other.bytes);
    }

    /// Sets a pixel state.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }

        let byte_index = y * LINE_BYTES + (x / 8);
        let bit_mask = 1u8 << (7 - (x % 8));

        if on {
            self.bytes[byte_index] |= bit_mask;
        } else {
            self.bytes[byte_index] &= !bit_mask;
        }

        true
    }

    /// Signed variant of [`Self::set_pixel`] for callers that draw partly
    /// off-panel.
    pub fn set_pixel_signed(&mut self, x: isize, y: isize, on: bool) -> bool {
        if x < 0 || y < 0 {
            return false;
        }

        self.set_pixel(x as usize, y as usize, on)
    }

    /// Reads a pixel state.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }

        let byte_index = y * LINE_BYTES + (x / 8);
        let bit_mask = 1u8 << (7 - (x % 8));
        Some((self.bytes[byte_index] & bit_mask) != 0)
    }

    /// Fills the rectangle spanned by two inclusive corners.
    ///
    /// Corners may be given in any order.
    pub fn draw_rect(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, on: bool) {
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };

        // Clamp to the panel so huge rectangles do not walk dead space.
        let left = left.max(0);
        let top = top.max(0);
        let right = right.min(WIDTH as isize - 1);
        let bottom = bottom.min(HEIGHT as isize - 1);

        for y in top..=bottom {
            for x in left..=right {
                self.set_pixel_signed(x, y, on);
            }
        }
    }

    /// Draws one glyph with its top-left corner at `(x, y)`.
    ///
    /// Only set glyph bits are written. Returns the cursor advance.
    pub fn draw_glyph<G>(&mut self, x: isize, y: isize, ch: char, on: bool, glyphs: &G) -> usize
    where
        G: GlyphSource + ?Sized,
    {
        let width = GlyphWidth::of(ch);

        for dy in 0..GLYPH_ROWS {
            let Some((left, right)) = glyphs.glyph_row(ch, dy) else {
                continue;
            };
            let row_bits = match width {
                GlyphWidth::Narrow => u16::from(left) << 8,
                GlyphWidth::Wide => (u16::from(left) << 8) | u16::from(right),
            };
            if row_bits == 0 {
                continue;
            }
            let Some(py) = y.checked_add(dy as isize) else {
                break;
            };

            for dx in 0..width.advance() {
                if row_bits & (0x8000 >> dx) == 0 {
                    continue;
                }
                let Some(px) = x.checked_add(dx as isize) else {
                    break;
                };
                self.set_pixel_signed(px, py, on);
            }
        }

        width.advance()
    }

    /// Draws a string starting at `(x, y)`.
    ///
    /// `'\n'` returns to the starting column one glyph row lower. There is no
    /// automatic wrapping; overflow is clipped.
    pub fn draw_text<G>(&mut self, x: isize, y: isize, text: &str, on: bool, glyphs: &G)
    where
        G: GlyphSource + ?Sized,
    {
        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            if ch == '\n' {
                cursor_x = x;
                cursor_y = cursor_y.saturating_add(GLYPH_ROWS as isize);
                continue;
            }

            let advance = self.draw_glyph(cursor_x, cursor_y, ch, on, glyphs);
            // Saturated cursors stay off-panel, so later glyphs clip.
            cursor_x = cursor_x.saturating_add(advance as isize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{GLYPH_BYTES, UnifontAtlas};
    use proptest::prelude::*;

    fn checksum(fb: &FrameBuffer) -> u64 {
        fb.bytes()
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, b)| acc.wrapping_mul(31).wrapping_add((i as u64) ^ u64::from(*b)))
    }

    /// Atlas with a solid block at `'#'` and a solid wide block at U+00C0.
    fn block_atlas() -> Vec<u8> {
        let mut bytes = vec![0u8; 0xC1 * GLYPH_BYTES];
        let narrow = '#' as usize * GLYPH_BYTES;
        bytes[narrow..narrow + GLYPH_BYTES].fill(0xFF);
        let wide = 0xC0 * GLYPH_BYTES;
        bytes[wide..wide + GLYPH_BYTES].fill(0xFF);
        bytes
    }

    fn lit_in(fb: &FrameBuffer, xs: core::ops::Range<usize>, ys: core::ops::Range<usize>) -> usize {
        let mut lit = 0;
        for y in ys {
            for x in xs.clone() {
                if fb.pixel(x, y) == Some(true) {
                    lit += 1;
                }
            }
        }
        lit
    }

    #[test]
    fn pixel_bit_mapping_is_msb_first_within_byte() {
        let mut fb = FrameBuffer::new();

        assert!(fb.set_pixel(0, 0, true));
        assert!(fb.set_pixel(7, 0, true));
        assert!(fb.set_pixel(8, 0, true));

        assert_eq!(fb.bytes()[0], 0b1000_0001);
        assert_eq!(fb.bytes()[1], 0b1000_0000);
    }

    #[test]
    fn set_and_read_last_pixel() {
        let mut fb = FrameBuffer::new();

        assert!(fb.set_pixel(WIDTH - 1, HEIGHT - 1, true));
        assert_eq!(fb.pixel(WIDTH - 1, HEIGHT - 1), Some(true));
        assert_eq!(fb.pixel(WIDTH, HEIGHT), None);
    }

    #[test]
    fn rect_normalizes_reversed_corners_and_fills() {
        let mut fb = FrameBuffer::new();
        fb.draw_rect(5, 3, 2, 1, true);

        assert_eq!(lit_in(&fb, 0..WIDTH, 0..HEIGHT), 4 * 3);
        assert_eq!(fb.pixel(3, 2), Some(true));
        assert_eq!(fb.pixel(6, 2), Some(false));
    }

    #[test]
    fn rect_partially_off_panel_is_clipped() {
        let mut fb = FrameBuffer::new();
        fb.draw_rect(-4, -4, 1, 1, true);
        fb.draw_rect(126, 62, 500, 500, true);

        assert_eq!(lit_in(&fb, 0..WIDTH, 0..HEIGHT), 4 + 4);
    }

    #[test]
    fn fill_sets_every_pixel() {
        let mut fb = FrameBuffer::new();
        fb.fill(true);
        assert!(fb.bytes().iter().all(|b| *b == 0xFF));
        fb.fill(false);
        assert!(fb.bytes().iter().all(|b| *b == 0x00));
    }

    #[test]
    fn narrow_glyph_uses_first_row_byte_only() {
        let bytes = block_atlas();
        let atlas = UnifontAtlas::new(&bytes).unwrap();
        let mut fb = FrameBuffer::new();

        let advance = fb.draw_glyph(0, 0, '#', true, &atlas);

        assert_eq!(advance, 8);
        assert_eq!(lit_in(&fb, 0..8, 0..16), 8 * 16);
        assert_eq!(lit_in(&fb, 8..WIDTH, 0..HEIGHT), 0);
    }

    #[test]
    fn wide_glyph_spans_sixteen_pixels() {
        let bytes = block_atlas();
        let atlas = UnifontAtlas::new(&bytes).unwrap();
        let mut fb = FrameBuffer::new();

        let advance = fb.draw_glyph(0, 0, '\u{C0}', true, &atlas);

        assert_eq!(advance, 16);
        assert_eq!(lit_in(&fb, 0..16, 0..16), 16 * 16);
        assert_eq!(lit_in(&fb, 16..WIDTH, 0..HEIGHT), 0);
    }

    #[test]
    fn text_advances_by_glyph_width_and_handles_newline() {
        let bytes = block_atlas();
        let atlas = UnifontAtlas::new(&bytes).unwrap();
        let mut fb = FrameBuffer::new();

        fb.draw_text(8, 0, "#\u{C0}#\n#", true, &atlas);

        assert_eq!(lit_in(&fb, 8..16, 0..16), 128);
        assert_eq!(lit_in(&fb, 16..32, 0..16), 256);
        assert_eq!(lit_in(&fb, 32..40, 0..16), 128);
        assert_eq!(lit_in(&fb, 8..16, 16..32), 128);
        assert_eq!(lit_in(&fb, 0..8, 0..HEIGHT), 0);
    }

    #[test]
    fn text_can_erase_on_highlight() {
        let bytes = block_atlas();
        let atlas = UnifontAtlas::new(&bytes).unwrap();
        let mut fb = FrameBuffer::new();

        fb.draw_rect(0, 0, 127, 15, true);
        fb.draw_text(0, 0, "#", false, &atlas);

        assert_eq!(lit_in(&fb, 0..8, 0..16), 0);
        assert_eq!(lit_in(&fb, 8..WIDTH, 0..16), 120 * 16);
    }

    #[test]
    fn glyphs_missing_from_the_atlas_draw_nothing() {
        let bytes = block_atlas();
        let atlas = UnifontAtlas::new(&bytes).unwrap();
        let mut fb = FrameBuffer::new();

        fb.draw_text(0, 0, "词", true, &atlas);

        assert_eq!(lit_in(&fb, 0..WIDTH, 0..HEIGHT), 0);
    }

    #[test]
    fn text_near_coordinate_limits_is_clipped() {
        let bytes = block_atlas();
        let atlas = UnifontAtlas::new(&bytes).unwrap();
        let mut fb = FrameBuffer::new();
        fb.set_pixel(3, 3, true);
        let before = checksum(&fb);

        fb.draw_text(isize::MAX - 4, 0, "##", true, &atlas);
        fb.draw_text(0, isize::MAX - 4, "#\n#", true, &atlas);
        fb.draw_text(isize::MAX - 20, isize::MAX - 20, "##\n##\nÀ", true, &atlas);
        fb.draw_glyph(isize::MAX, isize::MAX, '#', true, &atlas);

        assert_eq!(checksum(&fb), before);
    }

    proptest! {
        #[test]
        fn pixel_round_trips(x in 0..WIDTH, y in 0..HEIGHT, on in any::<bool>()) {
            let mut fb = FrameBuffer::new();
            fb.fill(!on);
            prop_assert!(fb.set_pixel(x, y, on));
            prop_assert_eq!(fb.pixel(x, y), Some(on));
        }

        #[test]
        fn out_of_bounds_writes_never_mutate(
            x in WIDTH..WIDTH * 4,
            y in 0..HEIGHT * 4,
            flip in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let mut fb = FrameBuffer::new();
            fb.set_pixel((seed % WIDTH as u64) as usize, (seed % HEIGHT as u64) as usize, true);
            let before = checksum(&fb);

            let (x, y) = if flip { (y % WIDTH, x + HEIGHT) } else { (x, y) };
            prop_assert!(!fb.set_pixel(x, y, true));
            prop_assert!(!fb.set_pixel_signed(-(x as isize) - 1, y as isize, true));
            prop_assert_eq!(checksum(&fb), before);
        }
    }
}
