//! SDK software timers

use core::cell::UnsafeCell;
use core::ffi::c_void;

use jsh_hal::SdkTimer;

use crate::sdk::{self, ETSTimer, ETSTimerFunc};

/// Statically allocated timer control block
///
/// The SDK links armed timers into its own list, so the block must never
/// move.
pub struct TimerBlock(UnsafeCell<ETSTimer>);

// SAFETY: the block is only handed to SDK timer calls, which all run in
// the single SDK task context
unsafe impl Sync for TimerBlock {}

impl TimerBlock {
    pub const fn new() -> Self {
        Self(UnsafeCell::new(ETSTimer::new()))
    }

    fn as_ptr(&self) -> *mut ETSTimer {
        self.0.get()
    }
}

impl Default for TimerBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one SDK timer with its callback bound
pub struct Esp8266Timer {
    block: &'static TimerBlock,
}

impl Esp8266Timer {
    /// Bind `callback` to `block`, leaving the timer disarmed
    pub(crate) fn bind(block: &'static TimerBlock, callback: ETSTimerFunc) -> Self {
        // SAFETY: the block is 'static and not armed by anyone else
        unsafe {
            sdk::ets_timer_disarm(block.as_ptr());
            sdk::ets_timer_setfn(block.as_ptr(), callback, core::ptr::null_mut::<c_void>());
        }
        Self { block }
    }
}

impl SdkTimer for Esp8266Timer {
    fn arm_ms(&mut self, period_ms: u32, repeat: bool) {
        // SAFETY: 'static control block with a bound callback
        unsafe { sdk::ets_timer_arm_new(self.block.as_ptr(), period_ms, repeat, true) }
    }

    fn arm_us(&mut self, period_us: u32, repeat: bool) {
        // SAFETY: 'static control block with a bound callback
        unsafe { sdk::ets_timer_arm_new(self.block.as_ptr(), period_us, repeat, false) }
    }

    fn disarm(&mut self) {
        // SAFETY: disarming an unarmed timer is a no-op
        unsafe { sdk::ets_timer_disarm(self.block.as_ptr()) }
    }
}
