//! Display lines on a Linux GPIO character device.

use std::path::Path;

use gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::{CdevPin, Delay};
use log::info;
use st7920::{Config, St7920};

use crate::error::{HalError, Result};

pub const CONSUMER: &str = "pocketdict";

pub const DEFAULT_CHIP: &str = "/dev/gpiochip0";
pub const DEFAULT_SID_LINE: u32 = 23;
pub const DEFAULT_SCLK_LINE: u32 = 24;
pub const DEFAULT_BACKLIGHT_LINE: u32 = 12;

pub type LinuxDisplay = St7920<CdevPin, CdevPin, CdevPin, Delay>;

/// Line offsets of the three display signals.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayLines {
    pub sid: u32,
    pub sclk: u32,
    pub backlight: u32,
}

impl Default for DisplayLines {
    fn default() -> Self {
        Self {
            sid: DEFAULT_SID_LINE,
            sclk: DEFAULT_SCLK_LINE,
            backlight: DEFAULT_BACKLIGHT_LINE,
        }
    }
}

/// Requests `line` as an output driven low.
pub fn request_output(chip: &mut Chip, chip_path: &Path, line: u32) -> Result<CdevPin> {
    let gpio_error = |source: gpio_cdev::Error| HalError::Gpio {
        chip: chip_path.to_path_buf(),
        line,
        source,
    };

    let handle = chip
        .get_line(line)
        .and_then(|requested| requested.request(LineRequestFlags::OUTPUT, 0, CONSUMER))
        .map_err(gpio_error)?;
    CdevPin::new(handle).map_err(gpio_error)
}

/// Claims the display lines and wraps them in a driver. Call
/// [`St7920::setup`] before the first commit.
pub fn open_display(chip_path: &Path, lines: DisplayLines, config: Config) -> Result<LinuxDisplay> {
    let mut chip = Chip::new(chip_path).map_err(|source| HalError::GpioChip {
        chip: chip_path.to_path_buf(),
        source,
    })?;

    let sid = request_output(&mut chip, chip_path, lines.sid)?;
    let sclk = request_output(&mut chip, chip_path, lines.sclk)?;
    let backlight = request_output(&mut chip, chip_path, lines.backlight)?;

    info!(
        "gpio: display lines claimed chip={} sid={} sclk={} backlight={}",
        chip_path.display(),
        lines.sid,
        lines.sclk,
        lines.backlight
    );
    Ok(St7920::new(sid, sclk, backlight, Delay, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lines_match_board_wiring() {
        let lines = DisplayLines::default();
        assert_eq!((lines.sid, lines.sclk, lines.backlight), (23, 24, 12));
    }

    #[test]
    fn missing_chip_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpiochip-missing");
        let result = open_display(&path, DisplayLines::default(), Config::default());
        assert!(matches!(result, Err(HalError::GpioChip { .. })));
    }
}
