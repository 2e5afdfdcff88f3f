//! Jsh8266 Hardware Abstraction Layer
//!
//! This crate defines the capability traits through which the interpreter
//! port touches the ESP8266: IO-mux and GPIO registers, the two hardware
//! counters and RTC user memory, SDK software timers, the HSPI unit, the
//! bit-banged I2C master, the PWM unit, the SPI flash chip and UART0.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Interpreter (external)                 │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  jsh-drivers (Board context, drivers)   │
//! │  jsh-core (pins, events, system time)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  jsh-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ jsh-hal-      │       │ mock backends │
//! │   esp8266     │       │  (host tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioRegisters`], [`gpio::AnalogInput`] - Pin mux, levels, edge interrupts, ADC
//! - [`clock::CounterSource`], [`clock::RtcMemory`] - Hardware counters and battery-backed RAM
//! - [`system::SystemInfo`], [`system::InterruptLock`] - Reset cause, MAC, RNG, global interrupt lock
//! - [`timer::SdkTimer`] - One-shot and periodic SDK timers
//! - [`spi::HspiBus`] - Hardware SPI unit
//! - [`i2c::I2cLines`] - Bit-level I2C master primitives
//! - [`pwm::PwmUnit`] - SDK PWM unit
//! - [`flash::FlashChip`] - Memory-mapped flash read, sector erase and write
//! - [`uart::UartTx`] - Byte-wise UART transmit

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod flash;
pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod spi;
pub mod system;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use clock::{CounterSource, RtcMemory};
pub use flash::{FlashChip, FlashError};
pub use gpio::{AnalogInput, GpioRegisters, InterruptMode, Pin};
pub use i2c::I2cLines;
pub use pwm::PwmUnit;
pub use spi::HspiBus;
pub use system::{InterruptLock, ResetReason, SystemInfo};
pub use timer::SdkTimer;
pub use uart::UartTx;
