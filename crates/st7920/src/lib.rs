#![cfg_attr(not(test), no_std)]

//! ST7920 (128x64 "12864" graphic LCD, serial mode) driver primitives.
//!
//! The serial wire has no acknowledgement path: a transfer that the panel
//! misses cannot be detected here and only shows up as stale pixels.

mod framebuffer;
pub mod glyph;
pub mod protocol;

pub use framebuffer::FrameBuffer;
pub use glyph::{GlyphSource, GlyphWidth, UnifontAtlas};

use embedded_hal::{
    delay::DelayNs,
    digital::{OutputPin, PinState},
};
use log::debug;

use protocol::{RegisterSelect, WORD_BYTES, WordAddress};

/// Driver timing configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// SCLK high time per bit. `0` relies on GPIO latency alone.
    pub clock_pulse_ns: u32,
    /// Wait after every byte transfer. `0` disables it.
    pub command_settle_ns: u32,
    /// Wait after the display-clear command.
    pub clear_settle_ns: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock_pulse_ns: 0,
            command_settle_ns: 0,
            clear_settle_ns: protocol::CLEAR_SETTLE_NS,
        }
    }
}

impl Config {
    pub const fn with_clock_pulse_ns(mut self, clock_pulse_ns: u32) -> Self {
        self.clock_pulse_ns = clock_pulse_ns;
        self
    }

    pub const fn with_command_settle_ns(mut self, command_settle_ns: u32) -> Self {
        self.command_settle_ns = command_settle_ns;
        self
    }

    pub const fn with_clear_settle_ns(mut self, clear_settle_ns: u32) -> Self {
        // The controller needs at least this long to finish a clear.
        self.clear_settle_ns = if clear_settle_ns < protocol::CLEAR_SETTLE_NS {
            protocol::CLEAR_SETTLE_NS
        } else {
            clear_settle_ns
        };
        self
    }
}

/// Driver errors.
///
/// These are failures reported by the GPIO layer while driving a line,
/// not panel-side errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SidErr, SclkErr, BlErr> {
    /// SID (data) line operation failed.
    Sid(SidErr),
    /// SCLK (clock) line operation failed.
    Sclk(SclkErr),
    /// Backlight line operation failed.
    Backlight(BlErr),
}

pub type DriverResult<SidErr, SclkErr, BlErr, T = ()> = Result<T, Error<SidErr, SclkErr, BlErr>>;

/// Bit-banged ST7920 driver holding the last image written to GDRAM.
#[derive(Debug)]
pub struct St7920<SID, SCLK, BL, D> {
    sid: SID,
    sclk: SCLK,
    backlight: BL,
    delay: D,
    config: Config,
    committed: FrameBuffer,
    synced: bool,
}

impl<SID, SCLK, BL, D> St7920<SID, SCLK, BL, D>
where
    SID: OutputPin,
    SCLK: OutputPin,
    BL: OutputPin,
    D: DelayNs,
{
    /// Creates a new driver instance. Call [`Self::setup`] before drawing.
    pub fn new(sid: SID, sclk: SCLK, backlight: BL, delay: D, config: Config) -> Self {
        Self {
            sid,
            sclk,
            backlight,
            delay,
            config,
            committed: FrameBuffer::new(),
            synced: false,
        }
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Image last written to the panel.
    pub fn committed(&self) -> &FrameBuffer {
        &self.committed
    }

    /// Releases owned pins and delay.
    pub fn release(self) -> (SID, SCLK, BL, D) {
        (self.sid, self.sclk, self.backlight, self.delay)
    }

    /// Drives the backlight line.
    pub fn set_backlight(&mut self, on: bool) -> DriverResult<SID::Error, SCLK::Error, BL::Error> {
        self.backlight
            .set_state(PinState::from(on))
            .map_err(Error::Backlight)
    }

    /// Runs the power-on sequence and enters graphics mode.
    ///
    /// GDRAM content is unknown afterwards, so the next commit is always a
    /// full one.
    pub fn setup(&mut self) -> DriverResult<SID::Error, SCLK::Error, BL::Error> {
        self.sclk.set_low().map_err(Error::Sclk)?;

        self.write_command(protocol::CMD_FUNCTION_BASIC)?;
        self.write_command(protocol::CMD_DISPLAY_CLEAR)?;
        self.delay.delay_ns(self.config.clear_settle_ns);
        self.write_command(protocol::CMD_FUNCTION_EXTENDED)?;
        self.write_command(protocol::CMD_GRAPHICS_ON)?;

        self.synced = false;
        debug!("st7920: setup complete");
        Ok(())
    }

    /// Writes every word of `pending`, then records it as committed.
    ///
    /// Returns the number of words sent.
    pub fn commit_full(
        &mut self,
        pending: &FrameBuffer,
    ) -> DriverResult<SID::Error, SCLK::Error, BL::Error, usize> {
        let bytes = pending.bytes();
        let mut words = 0usize;

        for offset in (0..bytes.len()).step_by(WORD_BYTES) {
            self.write_word(offset, [bytes[offset], bytes[offset + 1]])?;
            words += 1;
        }

        self.committed.copy_from(pending);
        self.synced = true;
        debug!("st7920: full commit words={}", words);
        Ok(words)
    }

    /// Writes only the words of `pending` that differ from the committed
    /// image, then records it as committed.
    ///
    /// Falls back to [`Self::commit_full`] when nothing has been committed
    /// since setup. Returns the number of words sent.
    pub fn commit_diff(
        &mut self,
        pending: &FrameBuffer,
    ) -> DriverResult<SID::Error, SCLK::Error, BL::Error, usize> {
        if !self.synced {
            return self.commit_full(pending);
        }

        let bytes = pending.bytes();
        let mut words = 0usize;

        for offset in (0..bytes.len()).step_by(WORD_BYTES) {
            if !protocol::word_changed(bytes, self.committed.bytes(), offset) {
                continue;
            }
            self.write_word(offset, [bytes[offset], bytes[offset + 1]])?;
            words += 1;
        }

        self.committed.copy_from(pending);
        debug!("st7920: diff commit words={}", words);
        Ok(words)
    }

    /// Sets the GDRAM write address.
    pub fn set_address(
        &mut self,
        address: WordAddress,
    ) -> DriverResult<SID::Error, SCLK::Error, BL::Error> {
        for command in protocol::address_commands(address) {
            self.write_command(command)?;
        }
        Ok(())
    }

    /// Sends one instruction byte.
    pub fn write_command(&mut self, value: u8) -> DriverResult<SID::Error, SCLK::Error, BL::Error> {
        self.write_transfer(RegisterSelect::Command, value)
    }

    /// Sends one data byte.
    pub fn write_data(&mut self, value: u8) -> DriverResult<SID::Error, SCLK::Error, BL::Error> {
        self.write_transfer(RegisterSelect::Data, value)
    }

    fn write_word(
        &mut self,
        offset: usize,
        data: [u8; WORD_BYTES],
    ) -> DriverResult<SID::Error, SCLK::Error, BL::Error> {
        // Offsets come from stepping a BUFFER_SIZE buffer by WORD_BYTES.
        let Some(address) = protocol::word_address(offset) else {
            return Ok(());
        };

        self.set_address(address)?;
        self.write_data(data[0])?;
        self.write_data(data[1])
    }

    fn write_transfer(
        &mut self,
        rs: RegisterSelect,
        value: u8,
    ) -> DriverResult<SID::Error, SCLK::Error, BL::Error> {
        for bit in protocol::encode_transfer(rs, value) {
            self.write_bit(bit)?;
        }

        if self.config.command_settle_ns > 0 {
            self.delay.delay_ns(self.config.command_settle_ns);
        }
        Ok(())
    }

    fn write_bit(&mut self, bit: bool) -> DriverResult<SID::Error, SCLK::Error, BL::Error> {
        self.sid.set_state(PinState::from(bit)).map_err(Error::Sid)?;
        self.sclk.set_high().map_err(Error::Sclk)?;
        if self.config.clock_pulse_ns > 0 {
            self.delay.delay_ns(self.config.clock_pulse_ns);
        }
        self.sclk.set_low().map_err(Error::Sclk)
    }
}
