//! Board-agnostic core logic for the ESP8266 interpreter port
//!
//! This crate contains everything that does not depend on the silicon
//! directly, written against the capability traits of `jsh-hal`:
//!
//! - Pin state table and IO-mux function tables
//! - Event identifiers and the interrupt-to-foreground event queue
//! - System time service (two-counter clock persisted in RTC memory)
//! - Error taxonomy and configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// MUST be the first module
pub(crate) mod fmt;

pub mod config;
pub mod error;
pub mod events;
pub mod pins;
pub mod time;

pub use config::HalConfig;
pub use error::HalError;
