//! Chip-level system information

/// Cause of the most recent reset, as reported by the SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum ResetReason {
    /// Power applied
    PowerOn = 0,
    /// Hardware watchdog expired
    HardwareWatchdog = 1,
    /// Fatal CPU exception
    Exception = 2,
    /// Software watchdog expired
    SoftwareWatchdog = 3,
    /// Software requested restart
    SoftRestart = 4,
    /// Woken from deep sleep
    DeepSleepAwake = 5,
    /// External reset pin
    ExternalSystem = 6,
}

impl ResetReason {
    /// Decode the SDK `rst_info.reason` value
    ///
    /// Unknown values are treated as a power-on reset.
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => ResetReason::HardwareWatchdog,
            2 => ResetReason::Exception,
            3 => ResetReason::SoftwareWatchdog,
            4 => ResetReason::SoftRestart,
            5 => ResetReason::DeepSleepAwake,
            6 => ResetReason::ExternalSystem,
            _ => ResetReason::PowerOn,
        }
    }

    /// Whether the RTC counter kept running through this reset
    ///
    /// Power-on, the external reset pin and deep-sleep wake (which exits
    /// through the reset pin) all restart the RTC counter.
    pub fn preserves_rtc(self) -> bool {
        matches!(
            self,
            ResetReason::HardwareWatchdog
                | ResetReason::Exception
                | ResetReason::SoftwareWatchdog
                | ResetReason::SoftRestart
        )
    }
}

/// Chip identity and reset bookkeeping
pub trait SystemInfo {
    /// Cause of the most recent reset
    fn reset_reason(&self) -> ResetReason;

    /// MAC address of the station interface
    fn station_mac(&self) -> [u8; 6];

    /// Word from the hardware random number generator
    fn random(&self) -> u32;
}

/// Global interrupt lock the interpreter brackets its own critical code with
///
/// Locking an already locked handle does nothing; so does unlocking an
/// unlocked one.
pub trait InterruptLock {
    fn lock(&mut self);

    fn unlock(&mut self);

    fn is_locked(&self) -> bool;
}
