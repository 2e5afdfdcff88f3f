//! Peripheral drivers for the ESP8266 interpreter port
//!
//! This crate provides the stateful drivers that sit on top of the
//! `jsh-hal` capability traits, and the [`Board`] context that owns them:
//!
//! - GPIO watch and the pin-change interrupt dispatcher
//! - PWM (SDK software PWM)
//! - SPI (HSPI with one-transaction read pipeline)
//! - I2C (bit-banged master)
//! - Flash window (1 MiB, 4 KiB pages)
//! - Utility timer driving the interpreter's scheduler
//! - UART transmit pump

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// MUST be the first module
pub(crate) mod fmt;

pub mod board;
pub mod flash;
pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod spi;
pub mod timer;
pub mod uart;

#[cfg(test)]
pub(crate) mod mock;

pub use board::{Board, Peripherals, Platform};
pub use flash::{FlashPage, FlashWindow};
pub use gpio::{dispatch_interrupt, watch_pin};
pub use i2c::{I2cError, I2cInfo, I2cMaster};
pub use pwm::PwmDriver;
pub use spi::{SpiDriver, SpiInfo};
pub use timer::UtilTimer;
pub use uart::{transmit_all, TxSource};
