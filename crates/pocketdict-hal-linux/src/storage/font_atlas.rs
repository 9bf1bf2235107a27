use std::path::Path;

use log::info;
use st7920::{
    GlyphSource, UnifontAtlas,
    glyph::{BMP_ATLAS_BYTES, GLYPH_BYTES, GLYPH_ROWS},
};

use crate::error::{HalError, Result};

/// Owned glyph atlas covering the whole Basic Multilingual Plane.
pub struct FontAtlas {
    bytes: Vec<u8>,
}

impl FontAtlas {
    /// Reads and validates an atlas file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| HalError::FontIo {
            path: path.to_path_buf(),
            source,
        })?;

        let atlas = Self::from_bytes(bytes, path)?;
        info!(
            "font: atlas loaded path={} glyphs={}",
            path.display(),
            atlas.glyph_count()
        );
        Ok(atlas)
    }

    /// Validates `bytes` as a full BMP atlas; `origin` names it in errors.
    pub fn from_bytes(bytes: Vec<u8>, origin: &Path) -> Result<Self> {
        if bytes.len() < BMP_ATLAS_BYTES {
            return Err(HalError::FontTruncated {
                path: origin.to_path_buf(),
                len: bytes.len(),
                expected: BMP_ATLAS_BYTES,
            });
        }
        UnifontAtlas::new(&bytes).map_err(|source| HalError::FontAtlas {
            path: origin.to_path_buf(),
            source,
        })?;

        Ok(Self { bytes })
    }

    pub fn glyph_count(&self) -> usize {
        self.bytes.len() / GLYPH_BYTES
    }
}

impl GlyphSource for FontAtlas {
    fn glyph_row(&self, ch: char, row: usize) -> Option<(u8, u8)> {
        if row >= GLYPH_ROWS {
            return None;
        }

        let start = ch as usize * GLYPH_BYTES + row * 2;
        let pair = self.bytes.get(start..start + 2)?;
        Some((pair[0], pair[1]))
    }
}
