use pocketdict_core::{list_window::SCREEN_ROWS, render::Screen};
use st7920::{
    FrameBuffer, GlyphSource,
    glyph::GLYPH_ROWS,
    protocol::WIDTH,
};

use super::FrameRenderer;

const ROW_HEIGHT: usize = GLYPH_ROWS;

/// Draws a header row plus up to three list rows, one glyph row each.
///
/// The highlighted row is a filled bar with its text drawn cleared.
#[derive(Debug, Clone)]
pub struct ListRenderer<G> {
    glyphs: G,
}

impl<G: GlyphSource> ListRenderer<G> {
    pub fn new(glyphs: G) -> Self {
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &G {
        &self.glyphs
    }

    fn draw_row(&self, frame: &mut FrameBuffer, row: usize, text: &str, highlighted: bool) {
        let y = (row * ROW_HEIGHT) as isize;
        if highlighted {
            frame.draw_rect(0, y, WIDTH as isize - 1, y + ROW_HEIGHT as isize - 1, true);
        }
        // Row text is single-line; the first newline ends it.
        let text = text.split('\n').next().unwrap_or("");
        frame.draw_text(0, y, text, !highlighted, &self.glyphs);
    }
}

impl<G: GlyphSource> FrameRenderer for ListRenderer<G> {
    fn render(&mut self, screen: Screen<'_>, frame: &mut FrameBuffer) {
        frame.fill(false);

        self.draw_row(frame, 0, screen.header(), false);
        let highlight = screen.highlight_row();
        for (index, text) in screen.rows().iter().take(SCREEN_ROWS - 1).enumerate() {
            let row = index + 1;
            self.draw_row(frame, row, text, highlight == Some(row));
        }
    }
}
