pub mod ecdict;
pub mod font_atlas;

pub use ecdict::{EcdictLookup, SearchPolicy};
pub use font_atlas::FontAtlas;
