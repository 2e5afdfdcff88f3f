//! Utility timer
//!
//! One-shot microsecond timer the interpreter's scheduler uses to wake up
//! for the next queued task. The callback is bound to the SDK timer by the
//! backend; this driver only arms and disarms it.

use jsh_core::time::SysTime;
use jsh_hal::SdkTimer;

#[derive(Debug)]
pub struct UtilTimer<T: SdkTimer> {
    timer: T,
    /// Period of the last arming (µs)
    period_us: Option<u32>,
}

impl<T: SdkTimer> UtilTimer<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            period_us: None,
        }
    }

    /// Put the timer in a known, disarmed state
    pub fn init(&mut self) {
        self.disable();
    }

    /// Fire once after `period` microseconds
    ///
    /// Negative periods fire immediately; periods beyond the 32-bit SDK
    /// range are clamped.
    pub fn start(&mut self, period: SysTime) {
        let period_us = period.clamp(0, u32::MAX as SysTime) as u32;
        self.timer.arm_us(period_us, false);
        self.period_us = Some(period_us);
        trace!("util timer armed for {}us", period_us);
    }

    /// Replace any pending expiry with a new one
    pub fn reschedule(&mut self, period: SysTime) {
        self.timer.disarm();
        self.start(period);
    }

    pub fn disable(&mut self) {
        self.timer.disarm();
        self.period_us = None;
    }

    /// Period of the pending expiry, if armed
    pub fn period_us(&self) -> Option<u32> {
        self.period_us
    }

    /// Called from the timer callback once it has fired
    pub fn expired(&mut self) {
        self.period_us = None;
    }
}
