//! Interpreter-facing event identifiers and the event queue
//!
//! Pin-change interrupts are pushed from interrupt context and drained by
//! the interpreter's foreground loop. This layer only ever produces.

pub mod queue;

pub use queue::{EventQueue, EventSink, DEFAULT_QUEUE_SIZE};

use jsh_hal::Pin;

use crate::pins::PIN_COUNT;

/// Peripheral device identifiers known to the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Device {
    /// UART0, the console
    Serial1,
    /// Hardware SPI (HSPI)
    Spi1,
    /// Not present on this chip
    Spi2,
    /// Not present on this chip
    Spi3,
    /// Bit-banged I2C master
    I2c1,
    /// Not present on this chip
    I2c2,
    /// Not present on this chip
    I2c3,
}

impl Device {
    /// Whether this is one of the interpreter's I2C device ids
    pub fn is_i2c(self) -> bool {
        matches!(self, Device::I2c1 | Device::I2c2 | Device::I2c3)
    }
}

/// Event identifier carried by queued events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventId {
    /// No event (returned when a watch request fails)
    None,
    /// Device readiness (e.g. UART data)
    Device(Device),
    /// Pin-change on external interrupt line `n` (one line per GPIO)
    Exti(u8),
}

impl EventId {
    /// The pin an external interrupt event belongs to
    pub fn pin(self) -> Option<Pin> {
        match self {
            EventId::Exti(line) if (line as usize) < PIN_COUNT => Some(line),
            _ => None,
        }
    }
}

/// Map a pin to its pin-change event identifier
pub fn exti_for_pin(pin: Pin) -> EventId {
    EventId::Exti(pin)
}

/// A single queued event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoEvent {
    /// What happened
    pub id: EventId,
    /// System time (µs) when the interrupt was taken
    pub time_us: u64,
}

impl IoEvent {
    /// Whether this event was raised by a change on `pin`
    pub fn is_for_pin(&self, pin: Pin) -> bool {
        self.id == exti_for_pin(pin)
    }
}
