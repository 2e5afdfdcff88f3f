//! I2C bus abstractions
//!
//! The ESP8266 has no I2C peripheral; the SDK ships a bit-banged master.
//! This trait exposes its bit-level primitives so that transaction
//! sequencing (and its abort policy) lives above the backend.

use crate::gpio::Pin;

/// Bit-banged I2C master lines
pub trait I2cLines {
    /// Claim `scl`/`sda` and set the bit rate
    fn init(&mut self, scl: Pin, sda: Pin, bitrate: u32);

    /// Issue a start condition
    fn start(&mut self);

    /// Issue a stop condition
    fn stop(&mut self);

    /// Clock out one byte
    fn write_byte(&mut self, byte: u8);

    /// Clock in one byte
    fn read_byte(&mut self) -> u8;

    /// Sample the acknowledge bit sent by the slave; `true` means ACK
    fn check_ack(&mut self) -> bool;

    /// Send an acknowledge bit; `true` sends ACK, `false` sends NACK
    fn send_ack(&mut self, ack: bool);
}

/// Standard-mode bit rate (Hz)
pub const STANDARD_MODE_HZ: u32 = 100_000;

/// Fast-mode bit rate (Hz)
pub const FAST_MODE_HZ: u32 = 400_000;
