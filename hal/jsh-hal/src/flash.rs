//! Flash chip abstractions
//!
//! The first megabyte of the SPI flash is memory-mapped for reads;
//! erase and write go through the SDK.

/// Errors from SDK flash operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// The SDK reported an error
    Error,
    /// The SDK gave up waiting for the chip
    Timeout,
}

impl core::fmt::Display for FlashError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FlashError::Error => f.write_str("error"),
            FlashError::Timeout => f.write_str("timeout"),
        }
    }
}

/// SPI flash chip
pub trait FlashChip {
    /// Read the aligned 32-bit word containing `addr` through the cache map
    ///
    /// `addr` is a flash offset; the low two bits are ignored.
    fn read_word(&self, addr: u32) -> u32;

    /// Erase one 4 KiB sector
    fn erase_sector(&mut self, sector: u16) -> Result<(), FlashError>;

    /// Program `data` at `addr`; both are 4-byte aligned
    fn write(&mut self, addr: u32, data: &[u8]) -> Result<(), FlashError>;
}
