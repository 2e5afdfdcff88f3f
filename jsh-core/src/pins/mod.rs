//! Pin configuration
//!
//! The pin state table is a cache of what was last requested for each
//! pin, together with the fixed IO-mux function tables used to apply it.

pub mod mux;
pub mod state;
pub mod table;

pub use mux::{function_for, is_reserved, ALT_FUNCTION, GPIO_FUNCTION};
pub use state::PinState;
pub use table::PinTable;

/// Number of GPIO pins (GPIO0..GPIO15)
pub const PIN_COUNT: usize = 16;

/// Pins wired to the SPI flash chip (GPIO6..GPIO11)
pub const RESERVED_PINS: core::ops::RangeInclusive<u8> = 6..=11;
