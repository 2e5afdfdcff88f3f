//! SPI bus abstractions
//!
//! The ESP8266 has one general-purpose SPI unit (HSPI) on GPIO12..15; the
//! other unit is wired to the flash chip.

/// Hardware SPI unit (HSPI)
pub trait HspiBus {
    /// Route the HSPI pins and reset the unit
    fn init(&mut self);

    /// Program the clock as `APB / prediv / cntdiv`
    fn set_clock(&mut self, prediv: u16, cntdiv: u8);

    /// Shift out one byte and return the byte shifted in
    fn transfer8(&mut self, byte: u8) -> u8;

    /// Shift out one 16-bit word, discarding input
    fn write16(&mut self, word: u16);

    /// Whether a transaction is still in flight
    fn is_busy(&self) -> bool;
}

/// SPI mode (clock polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Clock idles high (CPOL=1)
    pub fn idle_high(self) -> bool {
        matches!(self, Mode::Mode2 | Mode::Mode3)
    }

    /// Data is sampled on the trailing clock edge (CPHA=1)
    pub fn samples_on_trailing_edge(self) -> bool {
        matches!(self, Mode::Mode1 | Mode::Mode3)
    }
}
