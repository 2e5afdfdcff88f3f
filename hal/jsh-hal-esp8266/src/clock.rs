//! Hardware counters and RTC user memory

use core::ffi::c_void;

use jsh_hal::{CounterSource, RtcMemory};

use crate::sdk;

/// Bytes moved per RTC memory call; the SDK needs a word-aligned buffer
const CHUNK: usize = 64;

#[repr(align(4))]
struct Aligned([u8; CHUNK]);

/// System and RTC counters
#[derive(Debug)]
pub struct Esp8266Counters {
    _private: (),
}

impl Esp8266Counters {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl CounterSource for Esp8266Counters {
    fn system_counter(&self) -> u32 {
        // SAFETY: SDK call with no preconditions
        unsafe { sdk::system_get_time() }
    }

    fn rtc_counter(&self) -> u32 {
        // SAFETY: SDK call with no preconditions
        unsafe { sdk::system_get_rtc_time() }
    }

    fn rtc_calibration(&self) -> u32 {
        // SAFETY: SDK call with no preconditions
        unsafe { sdk::system_rtc_clock_cali_proc() }
    }

    fn barrier(&self) {
        #[cfg(target_arch = "xtensa")]
        // SAFETY: `memw` only orders memory accesses
        unsafe {
            core::arch::asm!("memw");
        }

        #[cfg(not(target_arch = "xtensa"))]
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

/// RTC user memory (word 64 onwards)
#[derive(Debug)]
pub struct Esp8266RtcMemory {
    _private: (),
}

impl Esp8266RtcMemory {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl RtcMemory for Esp8266RtcMemory {
    fn read(&mut self, slot: u8, buf: &mut [u8]) {
        let mut scratch = Aligned([0; CHUNK]);
        for (i, chunk) in buf.chunks_mut(CHUNK).enumerate() {
            let word = slot + (i * CHUNK / 4) as u8;
            // SAFETY: scratch is word-aligned and at least chunk.len() long
            let ok = unsafe {
                sdk::system_rtc_mem_read(
                    word,
                    scratch.0.as_mut_ptr() as *mut c_void,
                    chunk.len() as u16,
                )
            };
            if !ok {
                warn!("rtc memory read at word {} failed", word);
            }
            chunk.copy_from_slice(&scratch.0[..chunk.len()]);
        }
    }

    fn write(&mut self, slot: u8, data: &[u8]) {
        let mut scratch = Aligned([0; CHUNK]);
        for (i, chunk) in data.chunks(CHUNK).enumerate() {
            let word = slot + (i * CHUNK / 4) as u8;
            scratch.0[..chunk.len()].copy_from_slice(chunk);
            // SAFETY: scratch is word-aligned and at least chunk.len() long
            let ok = unsafe {
                sdk::system_rtc_mem_write(
                    word,
                    scratch.0.as_ptr() as *const c_void,
                    chunk.len() as u16,
                )
            };
            if !ok {
                warn!("rtc memory write at word {} failed", word);
            }
        }
    }
}
