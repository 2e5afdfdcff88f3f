//! Hardware counters and RTC user memory
//!
//! The ESP8266 exposes two free-running 32-bit counters: the system
//! counter ticks every microsecond but restarts on any reset, while the
//! RTC counter ticks off a slow RC oscillator and keeps running through
//! most resets and sleep. The RTC also carries a small block of user
//! memory that survives the same events.

/// Read access to both hardware counters
///
/// Reads must be callable from interrupt context.
pub trait CounterSource {
    /// Microsecond system counter (wraps every ~71 minutes)
    fn system_counter(&self) -> u32;

    /// RTC counter in slow-clock ticks
    fn rtc_counter(&self) -> u32;

    /// Microseconds per RTC tick as fixed point with 12 fractional bits
    fn rtc_calibration(&self) -> u32;

    /// Order the preceding counter reads before anything that follows
    fn barrier(&self) {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

/// Battery-backed RTC user memory, addressed in 32-bit words
pub trait RtcMemory {
    /// Read `buf.len()` bytes starting at word `slot`
    fn read(&mut self, slot: u8, buf: &mut [u8]);

    /// Write `data` starting at word `slot`
    fn write(&mut self, slot: u8, data: &[u8]);
}
