//! Board configuration
//!
//! Tunables for the hardware layer. The defaults match the ESP8266 NONOS
//! SDK environment; boards override them when constructing the `Board`.

use jsh_hal::Pin;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size of the memory-mapped flash window exposed to the interpreter
pub const FLASH_WINDOW_SIZE: u32 = 1024 * 1024;

/// log2 of the flash page size
pub const FLASH_PAGE_SHIFT: u32 = 12;

/// Flash page (erase sector) size
pub const FLASH_PAGE_SIZE: u32 = 1 << FLASH_PAGE_SHIFT;

/// Hardware layer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HalConfig {
    /// Interval of the periodic time reconciliation (ms)
    ///
    /// Must be well below the ~71 minute wrap of the system counter.
    pub time_update_period_ms: u32,
    /// RTC user-memory word offset of the persisted time record
    pub rtc_time_slot: u8,
    /// PWM frequency used when the first call does not give one (Hz)
    pub default_pwm_frequency_hz: u32,
    /// I2C clock pin when the interpreter leaves it unset
    pub default_i2c_scl: Pin,
    /// I2C data pin when the interpreter leaves it unset
    pub default_i2c_sda: Pin,
    /// CPU clock feeding the HSPI divider (Hz)
    pub cpu_clock_hz: u32,
}

impl HalConfig {
    /// SDK defaults
    pub const fn new() -> Self {
        Self {
            time_update_period_ms: 0x10000,
            // Byte offset 256 in RTC user memory
            rtc_time_slot: 64,
            default_pwm_frequency_hz: 1000,
            default_i2c_scl: 14,
            default_i2c_sda: 2,
            cpu_clock_hz: 80_000_000,
        }
    }
}

impl Default for HalConfig {
    fn default() -> Self {
        Self::new()
    }
}
