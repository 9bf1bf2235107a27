use std::path::PathBuf;

use clap::Parser;
use pocketdict_core::dictionary::MAX_RESULTS;
use pocketdict_hal_linux::{
    platform::gpio::{self, DisplayLines},
    storage::SearchPolicy,
};

const DEFAULT_FONT: &str = "unifont.bin";
const DEFAULT_DICT: &str = "dict/ecdict.db";

/// Offline English-Chinese pocket dictionary on a 128x64 ST7920 panel.
#[derive(Debug, Parser)]
#[command(name = "pocketdict", version, long_about = None)]
pub(super) struct Cli {
    /// Glyph atlas: 65536 cells of 32 bytes.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FONT)]
    pub font: PathBuf,
    /// ECDICT SQLite database.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DICT)]
    pub dict: PathBuf,
    /// GPIO character device carrying the display lines.
    #[arg(long, value_name = "PATH", default_value = gpio::DEFAULT_CHIP)]
    pub gpio_chip: PathBuf,
    #[arg(long, value_name = "LINE", default_value_t = gpio::DEFAULT_SID_LINE)]
    pub sid_line: u32,
    #[arg(long, value_name = "LINE", default_value_t = gpio::DEFAULT_SCLK_LINE)]
    pub sclk_line: u32,
    #[arg(long, value_name = "LINE", default_value_t = gpio::DEFAULT_BACKLIGHT_LINE)]
    pub backlight_line: u32,
    /// SCLK high time in nanoseconds; 0 relies on GPIO latency alone.
    #[arg(long, value_name = "NS", default_value_t = 0)]
    pub clock_pulse_ns: u32,
    /// Results per search, 1 to 20.
    #[arg(long, default_value_t = MAX_RESULTS)]
    pub limit: usize,
    /// Include multi-word phrases in search results.
    #[arg(long)]
    pub allow_phrases: bool,
    /// Log filter, e.g. `debug` or `pocketdict_core=debug`. Overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
    /// Leave the backlight off.
    #[arg(long)]
    pub no_backlight: bool,
}

impl Cli {
    pub fn display_lines(&self) -> DisplayLines {
        DisplayLines {
            sid: self.sid_line,
            sclk: self.sclk_line,
            backlight: self.backlight_line,
        }
    }

    pub fn driver_config(&self) -> st7920::Config {
        st7920::Config::default().with_clock_pulse_ns(self.clock_pulse_ns)
    }

    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy::default()
            .with_limit(self.limit)
            .with_exclude_phrases(!self.allow_phrases)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_board_wiring() {
        let cli = Cli::try_parse_from(["pocketdict"]).unwrap();
        assert_eq!(cli.font, PathBuf::from("unifont.bin"));
        assert_eq!(cli.dict, PathBuf::from("dict/ecdict.db"));
        assert_eq!(cli.gpio_chip, PathBuf::from("/dev/gpiochip0"));
        assert_eq!(cli.display_lines(), DisplayLines::default());
        assert_eq!(cli.search_policy(), SearchPolicy::default());
        assert!(!cli.no_backlight);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "pocketdict",
            "--sid-line",
            "5",
            "--limit",
            "8",
            "--allow-phrases",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.display_lines().sid, 5);
        assert_eq!(cli.search_policy().limit(), 8);
        assert_ne!(cli.search_policy(), SearchPolicy::default().with_limit(8));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
