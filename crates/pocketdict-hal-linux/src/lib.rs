//! Linux host glue for the pocket dictionary: GPIO lines, font atlas,
//! the SQLite word store, console keypad, and the screen renderer.

pub mod error;
pub mod input;
pub mod platform;
pub mod render;
pub mod storage;

pub use error::{DisplaySignal, HalError, Result};
