mod list;

pub use list::ListRenderer;

use pocketdict_core::render::Screen;
use st7920::FrameBuffer;

pub trait FrameRenderer {
    fn render(&mut self, screen: Screen<'_>, frame: &mut FrameBuffer);
}
