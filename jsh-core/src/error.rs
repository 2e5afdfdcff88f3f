//! Error taxonomy
//!
//! Errors returned here are handed to the interpreter, which reports them
//! once through its own error channel. Nothing in this layer is fatal:
//! best-effort operations (flash programming, time restore) only log.

use core::fmt;

use jsh_hal::Pin;

use crate::events::Device;
use crate::pins::PinState;

/// Which acknowledge bit of an I2C transaction was missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NackSource {
    /// The slave did not acknowledge its address
    Address,
    /// The slave did not acknowledge a data byte
    Data,
}

/// Errors reported to the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// Pin number outside the chip's GPIO range
    InvalidPin(Pin),
    /// Pin is wired to the flash chip and cannot be reconfigured
    ReservedPin(Pin),
    /// The pin state has no mux mapping on this chip
    UnsupportedPinState(PinState),
    /// The device is not available on this chip
    UnsupportedDevice(Device),
    /// Event flag does not correspond to a watched pin
    InvalidEvent,
    /// Expected an ACK on the I2C bus and got a NACK
    I2cNack(NackSource),
    /// Analog output requested but the chip has no DAC
    NoDac,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::InvalidPin(pin) => write!(f, "Invalid pin {}", pin),
            HalError::ReservedPin(_) => f.write_str("Cannot change pins used for flash chip"),
            HalError::UnsupportedPinState(state) => write!(f, "Pin state {} not supported", state),
            HalError::UnsupportedDevice(device) if device.is_i2c() => {
                f.write_str("Only I2C1 supported")
            }
            HalError::UnsupportedDevice(device) => write!(f, "Device {:?} not supported", device),
            HalError::InvalidEvent => f.write_str("eventFlag out of range"),
            HalError::I2cNack(_) => f.write_str("No ACK"),
            HalError::NoDac => f.write_str("No DAC"),
        }
    }
}
