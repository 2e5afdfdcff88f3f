//! ESP8266 backend for the interpreter hardware layer
//!
//! Implements every `jsh-hal` capability trait on top of the Espressif
//! NONOS SDK and the chip's memory-mapped GPIO/IO-mux registers, and hosts
//! the static state the SDK callbacks need:
//!
//! - the system clock (read by the GPIO interrupt for event timestamps)
//! - the pin-change event queue
//! - the SDK timer control blocks
//!
//! # Usage
//!
//! ```ignore
//! let peripherals = jsh_hal_esp8266::take(on_util_timer).unwrap();
//! let mut board = Board::new(peripherals, jsh_hal_esp8266::time(), HalConfig::default());
//! board.init();
//!
//! while let Some(event) = jsh_hal_esp8266::next_event() {
//!     // hand to the interpreter
//! }
//! ```
//!
//! This crate links against the SDK libraries (`libmain`, `libpwm`, the
//! Espruino `driver` library for HSPI, I2C and UART) and only builds for
//! the `xtensa-lx106` target.

#![no_std]
#![cfg_attr(target_arch = "xtensa", feature(asm_experimental_arch))]

// MUST be the first module
pub(crate) mod fmt;

pub mod clock;
pub mod flash;
pub mod gpio;
pub mod i2c;
mod interrupt;
pub mod pwm;
pub mod registers;
pub mod runtime;
pub mod sdk;
pub mod spi;
pub mod system;
pub mod timer;

pub use interrupt::Esp8266Interrupts;
pub use runtime::{next_event, take, time, Esp8266};
