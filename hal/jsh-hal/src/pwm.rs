//! PWM unit abstraction
//!
//! The SDK PWM driver is a software PWM clocked in 45 ns ticks, with the
//! period expressed in microseconds.

use crate::gpio::Pin;

/// SDK PWM unit
pub trait PwmUnit {
    /// Initialise the unit for a single channel on `pin`
    ///
    /// `mux_function` is the IO-mux GPIO function of the pin.
    fn init(&mut self, period_us: u32, pin: Pin, mux_function: u8);

    /// Start generating output
    fn start(&mut self);

    /// Change the PWM period
    fn set_period(&mut self, period_us: u32);

    /// Set the duty, in 45 ns ticks, of a channel
    fn set_duty(&mut self, duty: u32, channel: u8);
}
