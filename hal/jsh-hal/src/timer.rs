//! SDK software timer abstractions
//!
//! The NONOS SDK runs software timers from its timer task. Each timer
//! invokes a callback registered when the backend is constructed; these
//! traits only arm and disarm.

/// One SDK software timer
pub trait SdkTimer {
    /// Arm the timer with a period in milliseconds
    fn arm_ms(&mut self, period_ms: u32, repeat: bool);

    /// Arm the timer with a period in microseconds
    fn arm_us(&mut self, period_us: u32, repeat: bool);

    /// Disarm the timer; a pending expiry will not fire
    fn disarm(&mut self);
}
