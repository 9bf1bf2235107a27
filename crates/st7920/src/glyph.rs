//! Glyph cells addressed by codepoint.

/// Bytes per glyph cell in the atlas.
pub const GLYPH_BYTES: usize = 32;
/// Rows per glyph cell.
pub const GLYPH_ROWS: usize = 16;
/// Codepoints covered by a full Basic Multilingual Plane atlas.
pub const BMP_GLYPHS: usize = 0x1_0000;
/// Size of a full BMP atlas in bytes.
pub const BMP_ATLAS_BYTES: usize = BMP_GLYPHS * GLYPH_BYTES;

/// Codepoints below this bound render as narrow cells.
const NARROW_LIMIT: u32 = 128;

/// Horizontal extent of a rendered glyph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GlyphWidth {
    /// 8 pixels; only the first byte of each row is used.
    Narrow,
    /// 16 pixels; both row bytes form one 16-bit row.
    Wide,
}

impl GlyphWidth {
    pub const fn of(ch: char) -> Self {
        if (ch as u32) < NARROW_LIMIT {
            Self::Narrow
        } else {
            Self::Wide
        }
    }

    /// Cursor advance in pixels.
    pub const fn advance(self) -> usize {
        match self {
            Self::Narrow => 8,
            Self::Wide => 16,
        }
    }
}

/// Read-only access to glyph bitmaps.
pub trait GlyphSource {
    /// Returns the two bytes of `row` (0..16) for `ch`, MSB first.
    ///
    /// Returns `None` when the source has no cell for `ch`.
    fn glyph_row(&self, ch: char, row: usize) -> Option<(u8, u8)>;
}

impl<G: GlyphSource + ?Sized> GlyphSource for &G {
    fn glyph_row(&self, ch: char, row: usize) -> Option<(u8, u8)> {
        (**self).glyph_row(ch, row)
    }
}

/// Atlas construction errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtlasError {
    /// No glyph cells at all.
    Empty,
    /// Length is not a whole number of glyph cells.
    Misaligned { len: usize },
}

impl core::fmt::Display for AtlasError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => f.write_str("atlas holds no glyph cells"),
            Self::Misaligned { len } => {
                write!(f, "atlas length {len} is not a multiple of {GLYPH_BYTES}")
            }
        }
    }
}

impl core::error::Error for AtlasError {}

/// Flat Unifont-style atlas: cell `n` starts at byte `n * 32`.
#[derive(Clone, Copy, Debug)]
pub struct UnifontAtlas<'a> {
    bytes: &'a [u8],
}

impl<'a> UnifontAtlas<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self, AtlasError> {
        if bytes.is_empty() {
            return Err(AtlasError::Empty);
        }
        if bytes.len() % GLYPH_BYTES != 0 {
            return Err(AtlasError::Misaligned { len: bytes.len() });
        }

        Ok(Self { bytes })
    }

    /// Number of addressable cells.
    pub fn glyph_count(&self) -> usize {
        self.bytes.len() / GLYPH_BYTES
    }

    /// Whether every BMP codepoint has a cell.
    pub fn covers_bmp(&self) -> bool {
        self.glyph_count() >= BMP_GLYPHS
    }
}

impl GlyphSource for UnifontAtlas<'_> {
    fn glyph_row(&self, ch: char, row: usize) -> Option<(u8, u8)> {
        if row >= GLYPH_ROWS {
            return None;
        }

        let start = (ch as usize).checked_mul(GLYPH_BYTES)? + row * 2;
        let pair = self.bytes.get(start..start + 2)?;
        Some((pair[0], pair[1]))
    }
}
