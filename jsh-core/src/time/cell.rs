//! Lock-free stamp publication
//!
//! The system-counter stamp is read from interrupt context (every GPIO
//! event is time-stamped) while the periodic tick rewrites it. A
//! two-slot cell lets the writer fill the slot readers are not using and
//! publish it with a single atomic store. A reader retries only when a
//! publication happened during its read, which can only occur when the
//! writer preempted it, so the reader never waits on the writer.
//!
//! There must be a single writer at a time. On the ESP8266 both writers
//! (the periodic tick and an explicit set) run from the SDK task, which
//! does not preempt itself.

use core::sync::atomic::{fence, Ordering};

use portable_atomic::{AtomicI64, AtomicU32};

use super::stamp::TimeStamp;

struct Slot {
    logical_us: AtomicI64,
    counter: AtomicU32,
}

impl Slot {
    const fn new(stamp: TimeStamp) -> Self {
        Self {
            logical_us: AtomicI64::new(stamp.logical_us),
            counter: AtomicU32::new(stamp.counter),
        }
    }
}

/// Double-buffered [`TimeStamp`] with wait-free writes and lock-free reads
pub struct StampCell {
    /// Publication count; the live slot is `generation & 1`
    generation: AtomicU32,
    slots: [Slot; 2],
}

impl StampCell {
    /// Create a cell holding `stamp`
    pub const fn new(stamp: TimeStamp) -> Self {
        Self {
            generation: AtomicU32::new(0),
            slots: [Slot::new(stamp), Slot::new(stamp)],
        }
    }

    /// Read the current stamp
    ///
    /// Safe to call from interrupt context.
    pub fn load(&self) -> TimeStamp {
        loop {
            let before = self.generation.load(Ordering::Acquire);
            let slot = &self.slots[(before & 1) as usize];
            let stamp = TimeStamp {
                logical_us: slot.logical_us.load(Ordering::Relaxed),
                counter: slot.counter.load(Ordering::Relaxed),
            };
            fence(Ordering::Acquire);
            if self.generation.load(Ordering::Relaxed) == before {
                return stamp;
            }
        }
    }

    /// Publish a new stamp
    pub fn store(&self, stamp: TimeStamp) {
        let next = self.generation.load(Ordering::Relaxed).wrapping_add(1);
        let slot = &self.slots[(next & 1) as usize];
        // Keep the previous publication ordered before the slot is reused
        fence(Ordering::Release);
        slot.logical_us.store(stamp.logical_us, Ordering::Relaxed);
        slot.counter.store(stamp.counter, Ordering::Relaxed);
        self.generation.store(next, Ordering::Release);
    }

}

impl Default for StampCell {
    fn default() -> Self {
        Self::new(TimeStamp::ZERO)
    }
}

impl core::fmt::Debug for StampCell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("StampCell").field(&self.load()).finish()
    }
}
