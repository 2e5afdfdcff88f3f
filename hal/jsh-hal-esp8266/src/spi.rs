//! HSPI through the driver library

use jsh_hal::HspiBus;

use crate::registers::{self as reg, HSPI_CMD, SPI_USR};
use crate::sdk::{self, HSPI};

#[derive(Debug)]
pub struct Esp8266Hspi {
    _private: (),
}

impl Esp8266Hspi {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl HspiBus for Esp8266Hspi {
    fn init(&mut self) {
        // SAFETY: driver call; claims the HSPI pins
        unsafe { sdk::spi_init(HSPI) }
    }

    fn set_clock(&mut self, prediv: u16, cntdiv: u8) {
        // SAFETY: driver call with validated dividers
        unsafe { sdk::spi_clock(HSPI, prediv, cntdiv) }
    }

    fn transfer8(&mut self, byte: u8) -> u8 {
        // SAFETY: driver call; blocks until the byte is clocked
        unsafe { sdk::spi_tx8(HSPI, byte) }
    }

    fn write16(&mut self, word: u16) {
        // SAFETY: driver call; blocks until the word is clocked
        unsafe { sdk::spi_tx16(HSPI, word) }
    }

    fn is_busy(&self) -> bool {
        // SAFETY: read-only status poll
        unsafe { reg::read(HSPI_CMD) & SPI_USR != 0 }
    }
}
