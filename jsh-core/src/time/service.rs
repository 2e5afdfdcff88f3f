//! Two-counter system clock
//!
//! `SystemTime` holds two stamps: one anchored to the microsecond system
//! counter (used for every read) and one anchored to the RTC counter
//! (persisted so the clock can resume after a soft reset). All methods
//! take `&self` so a board can keep the service in a `static` and read it
//! from interrupt handlers.
//!
//! Nothing here fails: an untrustworthy record simply restarts the clock
//! at the epoch.

use jsh_hal::{CounterSource, ResetReason, RtcMemory};

use super::cell::StampCell;
use super::persist::PersistedTimeStamp;
use super::stamp::{wrap_delta, SysTime, TimeStamp};

/// How the clock came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartKind {
    /// Resumed from the persisted record
    Warm {
        /// Logical time at startup
        restored_us: SysTime,
    },
    /// The reset cleared the RTC counter; restarted at the epoch
    ColdReset(ResetReason),
    /// The persisted record failed its checksum; restarted at the epoch
    ColdChecksum,
}

/// Monotonic microsecond clock
#[derive(Debug)]
pub struct SystemTime {
    /// Stamp against the system counter
    sys: StampCell,
    /// Stamp against the RTC counter
    rtc: StampCell,
    /// RTC memory word offset of the persisted record
    slot: u8,
}

impl SystemTime {
    /// Create a clock at the epoch, persisting to RTC word `slot`
    pub const fn new(slot: u8) -> Self {
        Self {
            sys: StampCell::new(TimeStamp::ZERO),
            rtc: StampCell::new(TimeStamp::ZERO),
            slot,
        }
    }

    /// Current time in microseconds
    ///
    /// Never mutates state and never blocks; callable from interrupt
    /// context.
    #[inline]
    pub fn now<C: CounterSource>(&self, counters: &C) -> SysTime {
        // Stamp before counter: a tick landing in between then only makes
        // the reading slightly stale, never 2^32 µs ahead
        let stamp = self.sys.load();
        stamp.at(counters.system_counter())
    }

    /// Set the current time and persist it immediately
    pub fn set<C: CounterSource, M: RtcMemory>(
        &self,
        counters: &C,
        memory: &mut M,
        new_time: SysTime,
    ) {
        let sys_counter = counters.system_counter();
        let rtc_counter = counters.rtc_counter();
        counters.barrier();

        self.sys.store(TimeStamp::new(new_time, sys_counter));
        let rtc = TimeStamp::new(new_time, rtc_counter);
        self.rtc.store(rtc);
        PersistedTimeStamp::store(memory, self.slot, rtc);

        debug!("time set to {}s", new_time / 1_000_000);
    }

    /// Periodic reconciliation
    ///
    /// Must run at least once per system counter wrap (~71 minutes).
    pub fn tick<C: CounterSource, M: RtcMemory>(&self, counters: &C, memory: &mut M) {
        let sys_counter = counters.system_counter();
        let rtc_counter = counters.rtc_counter();
        counters.barrier();

        let mut sys = self.sys.load();
        sys.advance(sys_counter);
        self.sys.store(sys);

        let rtc = TimeStamp::new(sys.logical_us, rtc_counter);
        self.rtc.store(rtc);
        PersistedTimeStamp::store(memory, self.slot, rtc);

        trace!("time tick sys={} rtc={}", sys_counter, rtc_counter);
    }

    /// Reconcile the clock at startup
    ///
    /// Resumes from the persisted record only if the reset kept the RTC
    /// counter running and the record's checksum matches; otherwise both
    /// stamps restart at the epoch. A resumed clock is persisted straight
    /// away so a crash loop keeps the recovered baseline.
    pub fn init<C: CounterSource, M: RtcMemory>(
        &self,
        counters: &C,
        memory: &mut M,
        reason: ResetReason,
    ) -> StartKind {
        let record = PersistedTimeStamp::load(memory, self.slot);
        debug!(
            "RTC read: {}s counter={} checksum={:x}",
            record.stamp.logical_us / 1_000_000,
            record.stamp.counter,
            record.checksum
        );

        let restored = match (reason.preserves_rtc(), record.verify()) {
            (false, _) => {
                info!("RTC: cannot restore time (reset cleared the RTC)");
                self.reset();
                return StartKind::ColdReset(reason);
            }
            (true, None) => {
                info!("RTC: cannot restore time (bad checksum)");
                self.reset();
                return StartKind::ColdChecksum;
            }
            (true, Some(stamp)) => stamp,
        };

        let sys_counter = counters.system_counter();
        let rtc_counter = counters.rtc_counter();
        let calibration = counters.rtc_calibration();
        counters.barrier();

        let delta = wrap_delta(rtc_counter, restored.counter) as u64;
        let elapsed_us = (delta * calibration as u64) >> 12;
        let now = restored.logical_us.wrapping_add(elapsed_us as SysTime);

        let rtc = TimeStamp::new(now, rtc_counter);
        self.rtc.store(rtc);
        self.sys.store(TimeStamp::new(now, sys_counter));
        PersistedTimeStamp::store(memory, self.slot, rtc);

        info!(
            "RTC: restored time {}s (delta={} cal={}ns)",
            now / 1_000_000,
            delta,
            (calibration as u64 * 1000) >> 12
        );
        StartKind::Warm { restored_us: now }
    }

    /// Stamp anchored to the system counter
    pub fn system_stamp(&self) -> TimeStamp {
        self.sys.load()
    }

    /// Stamp anchored to the RTC counter
    pub fn rtc_stamp(&self) -> TimeStamp {
        self.rtc.load()
    }

    fn reset(&self) {
        self.sys.store(TimeStamp::ZERO);
        self.rtc.store(TimeStamp::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;

    use crate::time::persist::PERSISTED_SIZE;

    const SLOT: u8 = 64;

    /// Simulated counters
    struct MockCounters {
        system: Cell<u32>,
        rtc: Cell<u32>,
        calibration: u32,
    }

    impl MockCounters {
        fn new(system: u32, rtc: u32, calibration: u32) -> Self {
            Self {
                system: Cell::new(system),
                rtc: Cell::new(rtc),
                calibration,
            }
        }

        fn advance_system(&self, us: u32) {
            self.system.set(self.system.get().wrapping_add(us));
        }
    }

    impl CounterSource for MockCounters {
        fn system_counter(&self) -> u32 {
            self.system.get()
        }

        fn rtc_counter(&self) -> u32 {
            self.rtc.get()
        }

        fn rtc_calibration(&self) -> u32 {
            self.calibration
        }
    }

    struct MockRtcMemory {
        words: [u8; 512],
        writes: usize,
    }

    impl MockRtcMemory {
        fn new() -> Self {
            Self {
                words: [0; 512],
                writes: 0,
            }
        }

        fn with_record(stamp: TimeStamp) -> Self {
            let mut memory = Self::new();
            PersistedTimeStamp::store(&mut memory, SLOT, stamp);
            memory.writes = 0;
            memory
        }

        fn record(&mut self) -> PersistedTimeStamp {
            PersistedTimeStamp::load(self, SLOT)
        }
    }

    impl RtcMemory for MockRtcMemory {
        fn read(&mut self, slot: u8, buf: &mut [u8]) {
            let start = slot as usize * 4;
            buf.copy_from_slice(&self.words[start..start + buf.len()]);
        }

        fn write(&mut self, slot: u8, data: &[u8]) {
            let start = slot as usize * 4;
            self.words[start..start + data.len()].copy_from_slice(data);
            self.writes += 1;
        }
    }

    #[test]
    fn test_warm_start_after_watchdog() {
        // (2000 - 1000) * 8192 >> 12 == 2000
        let counters = MockCounters::new(0, 2000, 8192);
        let mut memory = MockRtcMemory::with_record(TimeStamp::new(5_000_000, 1000));
        let time = SystemTime::new(SLOT);

        let kind = time.init(&counters, &mut memory, ResetReason::HardwareWatchdog);

        assert_eq!(kind, StartKind::Warm { restored_us: 5_002_000 });
        assert_eq!(time.now(&counters), 5_002_000);
        assert_eq!(time.rtc_stamp(), TimeStamp::new(5_002_000, 2000));
        // Reconciled record persisted straight away
        assert_eq!(
            memory.record().verify(),
            Some(TimeStamp::new(5_002_000, 2000))
        );
    }

    #[test]
    fn test_warm_start_across_rtc_wrap() {
        let counters = MockCounters::new(0, 500, 4096); // 1 µs per tick
        let mut memory = MockRtcMemory::with_record(TimeStamp::new(1_000_000, u32::MAX - 499));
        let time = SystemTime::new(SLOT);

        time.init(&counters, &mut memory, ResetReason::SoftRestart);

        assert_eq!(time.now(&counters), 1_001_000);
    }

    #[test]
    fn test_cold_start_on_power_on() {
        let counters = MockCounters::new(0, 2000, 8192);
        let mut memory = MockRtcMemory::with_record(TimeStamp::new(5_000_000, 1000));
        let time = SystemTime::new(SLOT);

        let kind = time.init(&counters, &mut memory, ResetReason::PowerOn);

        assert_eq!(kind, StartKind::ColdReset(ResetReason::PowerOn));
        assert_eq!(time.now(&counters), 0);
        assert_eq!(time.rtc_stamp(), TimeStamp::ZERO);
        assert_eq!(memory.writes, 0);
    }

    #[test]
    fn test_cold_start_on_deep_sleep_and_reset_pin() {
        for reason in [ResetReason::DeepSleepAwake, ResetReason::ExternalSystem] {
            let counters = MockCounters::new(0, 2000, 8192);
            let mut memory = MockRtcMemory::with_record(TimeStamp::new(5_000_000, 1000));
            let time = SystemTime::new(SLOT);

            assert_eq!(
                time.init(&counters, &mut memory, reason),
                StartKind::ColdReset(reason)
            );
            assert_eq!(time.now(&counters), 0);
        }
    }

    #[test]
    fn test_cold_start_on_bad_checksum() {
        let counters = MockCounters::new(0, 2000, 8192);
        let mut memory = MockRtcMemory::with_record(TimeStamp::new(5_000_000, 1000));
        memory.words[SLOT as usize * 4 + PERSISTED_SIZE - 1] ^= 0x80;
        let time = SystemTime::new(SLOT);

        let kind = time.init(&counters, &mut memory, ResetReason::Exception);

        assert_eq!(kind, StartKind::ColdChecksum);
        assert_eq!(time.now(&counters), 0);
    }

    #[test]
    fn test_now_does_not_mutate() {
        let counters = MockCounters::new(100, 0, 4096);
        let time = SystemTime::new(SLOT);

        assert_eq!(time.now(&counters), 100);
        assert_eq!(time.now(&counters), 100);
        assert_eq!(time.system_stamp(), TimeStamp::ZERO);
    }

    /// Counters whose next system read is interrupted by the periodic tick
    struct PreemptedCounters<'a> {
        inner: MockCounters,
        time: &'a SystemTime,
        memory: core::cell::RefCell<MockRtcMemory>,
        armed: Cell<bool>,
    }

    impl CounterSource for PreemptedCounters<'_> {
        fn system_counter(&self) -> u32 {
            let sampled = self.inner.system_counter();
            if self.armed.replace(false) {
                self.inner.advance_system(10);
                self.time.tick(&self.inner, &mut *self.memory.borrow_mut());
            }
            sampled
        }

        fn rtc_counter(&self) -> u32 {
            self.inner.rtc_counter()
        }

        fn rtc_calibration(&self) -> u32 {
            self.inner.rtc_calibration()
        }
    }

    #[test]
    fn test_now_monotonic_when_tick_preempts_read() {
        let time = SystemTime::new(SLOT);
        let counters = PreemptedCounters {
            inner: MockCounters::new(1000, 0, 4096),
            time: &time,
            memory: core::cell::RefCell::new(MockRtcMemory::new()),
            armed: Cell::new(false),
        };

        let before = time.now(&counters);
        counters.armed.set(true);
        let during = time.now(&counters);
        let after = time.now(&counters);

        assert_eq!(before, 1000);
        assert!(before <= during && during <= after, "{before} {during} {after}");
        assert_eq!(after, 1010);
        assert_eq!(time.system_stamp(), TimeStamp::new(1010, 1010));
    }

    /// Counters that log each access
    struct TracingCounters {
        inner: MockCounters,
        log: core::cell::RefCell<Vec<&'static str>>,
    }

    impl CounterSource for TracingCounters {
        fn system_counter(&self) -> u32 {
            self.log.borrow_mut().push("sys");
            self.inner.system_counter()
        }

        fn rtc_counter(&self) -> u32 {
            self.log.borrow_mut().push("rtc");
            self.inner.rtc_counter()
        }

        fn rtc_calibration(&self) -> u32 {
            self.log.borrow_mut().push("cal");
            self.inner.rtc_calibration()
        }

        fn barrier(&self) {
            self.log.borrow_mut().push("barrier");
        }
    }

    #[test]
    fn test_barrier_follows_paired_counter_reads() {
        let counters = TracingCounters {
            inner: MockCounters::new(0, 2000, 8192),
            log: core::cell::RefCell::new(Vec::new()),
        };
        let mut memory = MockRtcMemory::with_record(TimeStamp::new(5_000_000, 1000));
        let time = SystemTime::new(SLOT);

        time.init(&counters, &mut memory, ResetReason::SoftRestart);
        assert_eq!(*counters.log.borrow(), ["sys", "rtc", "cal", "barrier"]);

        counters.log.borrow_mut().clear();
        time.tick(&counters, &mut memory);
        assert_eq!(*counters.log.borrow(), ["sys", "rtc", "barrier"]);

        counters.log.borrow_mut().clear();
        time.set(&counters, &mut memory, 7);
        assert_eq!(*counters.log.borrow(), ["sys", "rtc", "barrier"]);
    }

    #[test]
    fn test_set_persists_rtc_stamp() {
        let counters = MockCounters::new(1_000, 777, 4096);
        let mut memory = MockRtcMemory::new();
        let time = SystemTime::new(SLOT);

        time.set(&counters, &mut memory, 1_000_000_000);

        assert_eq!(time.now(&counters), 1_000_000_000);
        counters.advance_system(250);
        assert_eq!(time.now(&counters), 1_000_000_250);
        assert_eq!(
            memory.record().verify(),
            Some(TimeStamp::new(1_000_000_000, 777))
        );
    }

    #[test]
    fn test_tick_folds_elapsed_time() {
        let counters = MockCounters::new(0, 0, 4096);
        let mut memory = MockRtcMemory::new();
        let time = SystemTime::new(SLOT);

        counters.advance_system(3_000_000);
        counters.rtc.set(50);
        time.tick(&counters, &mut memory);

        assert_eq!(time.system_stamp(), TimeStamp::new(3_000_000, 3_000_000));
        assert_eq!(time.rtc_stamp(), TimeStamp::new(3_000_000, 50));
        assert_eq!(memory.record().verify(), Some(TimeStamp::new(3_000_000, 50)));
        assert_eq!(memory.writes, 1);
    }

    #[test]
    fn test_ticks_carry_time_across_many_wraps() {
        let counters = MockCounters::new(u32::MAX - 10, 0, 4096);
        let mut memory = MockRtcMemory::new();
        let time = SystemTime::new(SLOT);
        time.set(&counters, &mut memory, 0);

        // Five wraps worth of time in 1 000 s steps
        let step = 1_000_000_000u32;
        let steps = 5 * 5;
        for _ in 0..steps {
            counters.advance_system(step);
            time.tick(&counters, &mut memory);
        }

        assert_eq!(time.now(&counters), steps as i64 * step as i64);
    }

    #[test]
    fn test_warm_start_after_previous_session() {
        // Run, tick, "reset" into a fresh service with the same RTC memory
        let counters = MockCounters::new(0, 10_000, 4096 * 30);
        let mut memory = MockRtcMemory::new();
        let before = SystemTime::new(SLOT);
        before.set(&counters, &mut memory, 42_000_000);
        counters.advance_system(5_000_000);
        before.tick(&counters, &mut memory);

        let after = SystemTime::new(SLOT);
        let counters = MockCounters::new(0, 10_100, 4096 * 30); // 100 ticks of 30 µs
        after.init(&counters, &mut memory, ResetReason::SoftwareWatchdog);

        assert_eq!(after.now(&counters), 47_003_000);
    }

    proptest! {
        #[test]
        fn prop_monotonic_across_wrap(
            start in any::<u32>(),
            steps in proptest::collection::vec((1u32..600_000_000, any::<bool>()), 1..64),
        ) {
            let counters = MockCounters::new(start, 0, 4096);
            let mut memory = MockRtcMemory::new();
            let time = SystemTime::new(SLOT);
            time.set(&counters, &mut memory, 0);
            let mut last = time.now(&counters);
            let mut since_tick = 0u64;

            for (advance, tick) in steps {
                counters.advance_system(advance);
                since_tick += advance as u64;
                // The periodic tick runs at least once per counter wrap
                if tick || since_tick > 3_000_000_000 {
                    time.tick(&counters, &mut memory);
                    since_tick = 0;
                }
                let now = time.now(&counters);
                prop_assert!(now >= last);
                last = now;
            }
        }
    }
}
