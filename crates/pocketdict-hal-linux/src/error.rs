use std::{fmt, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HalError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Display signal whose GPIO write failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisplaySignal {
    Sid,
    Sclk,
    Backlight,
}

impl fmt::Display for DisplaySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sid => "SID",
            Self::Sclk => "SCLK",
            Self::Backlight => "backlight",
        })
    }
}

#[derive(Debug, Error)]
pub enum HalError {
    #[error("gpio chip {chip:?} cannot be opened: {source}")]
    GpioChip {
        chip: PathBuf,
        #[source]
        source: gpio_cdev::Error,
    },

    #[error("gpio line {line} on {chip:?}: {source}")]
    Gpio {
        chip: PathBuf,
        line: u32,
        #[source]
        source: gpio_cdev::Error,
    },

    #[error("font atlas I/O failure at {path:?}: {source}")]
    FontIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font atlas at {path:?} is invalid: {source}")]
    FontAtlas {
        path: PathBuf,
        #[source]
        source: st7920::glyph::AtlasError,
    },

    #[error("font atlas at {path:?} holds {len} bytes, need {expected}")]
    FontTruncated {
        path: PathBuf,
        len: usize,
        expected: usize,
    },

    #[error("dictionary at {path:?} cannot be opened: {source}")]
    DictOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("dictionary query failed: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("display {signal} line write failed: {source}")]
    Display {
        signal: DisplaySignal,
        #[source]
        source: BoxedSource,
    },

    #[error("console input failed: {0}")]
    Input(#[from] std::io::Error),
}

impl<SidErr, SclkErr, BlErr> From<st7920::Error<SidErr, SclkErr, BlErr>> for HalError
where
    SidErr: std::error::Error + Send + Sync + 'static,
    SclkErr: std::error::Error + Send + Sync + 'static,
    BlErr: std::error::Error + Send + Sync + 'static,
{
    fn from(err: st7920::Error<SidErr, SclkErr, BlErr>) -> Self {
        let (signal, source): (DisplaySignal, BoxedSource) = match err {
            st7920::Error::Sid(e) => (DisplaySignal::Sid, Box::new(e)),
            st7920::Error::Sclk(e) => (DisplaySignal::Sclk, Box::new(e)),
            st7920::Error::Backlight(e) => (DisplaySignal::Backlight, Box::new(e)),
        };
        Self::Display { signal, source }
    }
}
