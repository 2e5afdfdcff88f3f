//! Interrupt masking
//!
//! The `critical-section` implementation raises the interrupt level to 3,
//! which is what the SDK's `ets_intr_lock` does: it masks every
//! interrupt but the NMI, which the SDK reserves for Wi-Fi.

use critical_section::RestoreState;
use jsh_hal::InterruptLock;

use crate::sdk;

/// Global interrupt lock handed to the interpreter
///
/// Holds the restore token of an open critical section between `lock`
/// and `unlock`.
#[derive(Debug)]
pub struct Esp8266Interrupts {
    restore: Option<RestoreState>,
}

impl Esp8266Interrupts {
    pub(crate) const fn new() -> Self {
        Self { restore: None }
    }
}

impl InterruptLock for Esp8266Interrupts {
    fn lock(&mut self) {
        if self.restore.is_none() {
            // SAFETY: the token is released by `unlock`, and any nested
            // critical section restores to this locked level
            self.restore = Some(unsafe { critical_section::acquire() });
        }
    }

    fn unlock(&mut self) {
        if let Some(token) = self.restore.take() {
            // SAFETY: token from the matching `acquire` in `lock`
            unsafe { critical_section::release(token) }
        }
    }

    fn is_locked(&self) -> bool {
        self.restore.is_some()
    }
}

/// GPIO interrupt line in the `ets_isr_*` masks
const GPIO_MASK: u32 = 1 << sdk::ETS_GPIO_INUM;

pub(crate) fn mask_gpio() {
    // SAFETY: ROM call, only touches the interrupt enable register
    unsafe { sdk::ets_isr_mask(GPIO_MASK) }
}

pub(crate) fn unmask_gpio() {
    // SAFETY: ROM call, only touches the interrupt enable register
    unsafe { sdk::ets_isr_unmask(GPIO_MASK) }
}

#[cfg(target_arch = "xtensa")]
mod single_core {
    use critical_section::RawRestoreState;

    struct Esp8266CriticalSection;
    critical_section::set_impl!(Esp8266CriticalSection);

    unsafe impl critical_section::Impl for Esp8266CriticalSection {
        unsafe fn acquire() -> RawRestoreState {
            let token: RawRestoreState;
            core::arch::asm!("rsil {0}, 3", out(reg) token);
            token
        }

        unsafe fn release(token: RawRestoreState) {
            core::arch::asm!("wsr.ps {0}", "rsync", in(reg) token);
        }
    }
}
