//! Time stamps anchored to a hardware counter

/// Microseconds since the epoch, as exchanged with the interpreter
pub type SysTime = i64;

/// Elapsed ticks between two readings of a free-running 32-bit counter
///
/// Unsigned wrapping subtraction is correct across a single rollover.
#[inline]
pub const fn wrap_delta(now: u32, then: u32) -> u32 {
    now.wrapping_sub(then)
}

/// A logical time together with the counter value it corresponds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeStamp {
    /// Microseconds since the epoch at the anchor
    pub logical_us: SysTime,
    /// Hardware counter reading at the anchor
    pub counter: u32,
}

impl TimeStamp {
    /// The epoch anchored at counter zero
    pub const ZERO: Self = Self {
        logical_us: 0,
        counter: 0,
    };

    /// Create a stamp
    pub const fn new(logical_us: SysTime, counter: u32) -> Self {
        Self {
            logical_us,
            counter,
        }
    }

    /// Logical time at a microsecond counter reading, without re-anchoring
    #[inline]
    pub fn at(&self, counter: u32) -> SysTime {
        self.logical_us
            .wrapping_add(wrap_delta(counter, self.counter) as SysTime)
    }

    /// Re-anchor at a newer microsecond counter reading
    pub fn advance(&mut self, counter: u32) {
        self.logical_us = self.at(counter);
        self.counter = counter;
    }
}
