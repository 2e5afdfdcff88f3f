//! Mock backend for host tests
//!
//! Every mock records what the drivers asked of it so tests can assert on
//! the exact sequence of hardware operations.

use std::cell::Cell;
use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use jsh_core::pins::PIN_COUNT;
use jsh_hal::{
    AnalogInput, CounterSource, FlashChip, FlashError, GpioRegisters, HspiBus, I2cLines,
    InterruptLock, InterruptMode, Pin, PwmUnit, ResetReason, RtcMemory, SdkTimer, SystemInfo,
    UartTx,
};

use crate::board::{Peripherals, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioOp {
    DisableIrq,
    EnableIrq,
    Mode(Pin, InterruptMode),
    Ack(u32),
}

#[derive(Debug)]
pub struct MockGpio {
    pub function: [Option<u8>; PIN_COUNT],
    pub pullup: [bool; PIN_COUNT],
    pub output: [bool; PIN_COUNT],
    pub open_drain: [bool; PIN_COUNT],
    pub level: [bool; PIN_COUNT],
    pub input: [bool; PIN_COUNT],
    pub mode: [InterruptMode; PIN_COUNT],
    pub irq_enabled: bool,
    pub ops: Vec<GpioOp>,
    pub adc: u16,
}

impl Default for MockGpio {
    fn default() -> Self {
        Self {
            function: [None; PIN_COUNT],
            pullup: [false; PIN_COUNT],
            output: [false; PIN_COUNT],
            open_drain: [false; PIN_COUNT],
            level: [false; PIN_COUNT],
            input: [false; PIN_COUNT],
            mode: [InterruptMode::Disabled; PIN_COUNT],
            irq_enabled: false,
            ops: Vec::new(),
            adc: 0,
        }
    }
}

impl GpioRegisters for MockGpio {
    fn select_function(&mut self, pin: Pin, function: u8) {
        self.function[pin as usize] = Some(function);
    }

    fn set_pullup(&mut self, pin: Pin, enabled: bool) {
        self.pullup[pin as usize] = enabled;
    }

    fn set_output_enable(&mut self, pin: Pin, enabled: bool) {
        self.output[pin as usize] = enabled;
    }

    fn set_open_drain(&mut self, pin: Pin, open_drain: bool) {
        self.open_drain[pin as usize] = open_drain;
    }

    fn write(&mut self, pin: Pin, high: bool) {
        self.level[pin as usize] = high;
    }

    fn read(&self, pin: Pin) -> bool {
        self.input[pin as usize]
    }

    fn set_interrupt_mode(&mut self, pin: Pin, mode: InterruptMode) {
        self.mode[pin as usize] = mode;
        self.ops.push(GpioOp::Mode(pin, mode));
    }

    fn acknowledge_interrupts(&mut self, mask: u32) {
        self.ops.push(GpioOp::Ack(mask));
    }

    fn disable_gpio_interrupts(&mut self) {
        self.irq_enabled = false;
        self.ops.push(GpioOp::DisableIrq);
    }

    fn enable_gpio_interrupts(&mut self) {
        self.irq_enabled = true;
        self.ops.push(GpioOp::EnableIrq);
    }
}

impl AnalogInput for MockGpio {
    fn read_adc(&mut self) -> u16 {
        self.adc
    }
}

#[derive(Debug)]
pub struct MockCounters {
    pub system: Cell<u32>,
    pub rtc: Cell<u32>,
    pub calibration: u32,
}

impl Default for MockCounters {
    fn default() -> Self {
        Self {
            system: Cell::new(0),
            rtc: Cell::new(0),
            // 2µs per RTC tick
            calibration: 8192,
        }
    }
}

impl MockCounters {
    pub fn advance_us(&self, us: u32) {
        self.system.set(self.system.get().wrapping_add(us));
        self.rtc.set(self.rtc.get().wrapping_add(us / 2));
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

pub struct MockRtcMemory {
    pub words: [u8; 768],
}

impl Default for MockRtcMemory {
    fn default() -> Self {
        Self { words: [0; 768] }
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
    }
}

#[derive(Debug)]
pub struct MockSystem {
    pub reason: ResetReason,
    pub mac: [u8; 6],
    /// Next value returned by `random`; advances on every call
    pub rng: Cell<u32>,
}

impl Default for MockSystem {
    fn default() -> Self {
        Self {
            reason: ResetReason::PowerOn,
            mac: [0x5c, 0xcf, 0x7f, 0x01, 0xab, 0x0e],
            rng: Cell::new(0x1234_5678),
        }
    }
}

impl SystemInfo for MockSystem {
    fn reset_reason(&self) -> ResetReason {
        self.reason
    }

    fn station_mac(&self) -> [u8; 6] {
        self.mac
    }

    fn random(&self) -> u32 {
        let value = self.rng.get();
        self.rng.set(value.wrapping_mul(1_664_525).wrapping_add(1_013_904_223));
        value
    }
}

#[derive(Debug, Default)]
pub struct MockInterrupts {
    pub locked: bool,
    pub lock_count: usize,
    pub unlock_count: usize,
}

impl InterruptLock for MockInterrupts {
    fn lock(&mut self) {
        if !self.locked {
            self.locked = true;
            self.lock_count += 1;
        }
    }

    fn unlock(&mut self) {
        if self.locked {
            self.locked = false;
            self.unlock_count += 1;
        }
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arming {
    Ms(u32, bool),
    Us(u32, bool),
}

#[derive(Debug, Default)]
pub struct MockTimer {
    pub armed: Option<Arming>,
    pub arm_count: usize,
    pub disarm_count: usize,
}

impl SdkTimer for MockTimer {
    fn arm_ms(&mut self, period_ms: u32, repeat: bool) {
        self.armed = Some(Arming::Ms(period_ms, repeat));
        self.arm_count += 1;
    }

    fn arm_us(&mut self, period_us: u32, repeat: bool) {
        self.armed = Some(Arming::Us(period_us, repeat));
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.armed = None;
        self.disarm_count += 1;
    }
}

/// HSPI mock; the byte clocked back is the complement of the byte sent
#[derive(Debug, Default)]
pub struct MockSpi {
    pub init_count: usize,
    pub clock: Option<(u16, u8)>,
    pub sent: Vec<u8>,
    pub words: Vec<u16>,
    /// Number of `is_busy` polls that report busy before going idle
    pub busy_for: Cell<u32>,
    pub polls: Cell<u32>,
}

impl HspiBus for MockSpi {
    fn init(&mut self) {
        self.init_count += 1;
    }

    fn set_clock(&mut self, prediv: u16, cntdiv: u8) {
        self.clock = Some((prediv, cntdiv));
    }

    fn transfer8(&mut self, byte: u8) -> u8 {
        self.sent.push(byte);
        !byte
    }

    fn write16(&mut self, word: u16) {
        self.words.push(word);
    }

    fn is_busy(&self) -> bool {
        self.polls.set(self.polls.get() + 1);
        let left = self.busy_for.get();
        if left > 0 {
            self.busy_for.set(left - 1);
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cOp {
    Start,
    Stop,
    Write(u8),
    Read(u8),
    Ack(bool),
}

#[derive(Debug, Default)]
pub struct MockI2c {
    pub init: Option<(Pin, Pin, u32)>,
    pub ops: Vec<I2cOp>,
    /// ACK answers for successive `check_ack` calls; empty means ACK
    pub acks: VecDeque<bool>,
    pub rx: VecDeque<u8>,
}

impl I2cLines for MockI2c {
    fn init(&mut self, scl: Pin, sda: Pin, bitrate: u32) {
        self.init = Some((scl, sda, bitrate));
    }

    fn start(&mut self) {
        self.ops.push(I2cOp::Start);
    }

    fn stop(&mut self) {
        self.ops.push(I2cOp::Stop);
    }

    fn write_byte(&mut self, byte: u8) {
        self.ops.push(I2cOp::Write(byte));
    }

    fn read_byte(&mut self) -> u8 {
        let byte = self.rx.pop_front().unwrap_or(0xff);
        self.ops.push(I2cOp::Read(byte));
        byte
    }

    fn check_ack(&mut self) -> bool {
        self.acks.pop_front().unwrap_or(true)
    }

    fn send_ack(&mut self, ack: bool) {
        self.ops.push(I2cOp::Ack(ack));
    }
}

#[derive(Debug, Default)]
pub struct MockPwm {
    pub init: Option<(u32, Pin, u8)>,
    pub init_count: usize,
    pub started: usize,
    pub period: Option<u32>,
    pub duty: Option<(u32, u8)>,
}

impl PwmUnit for MockPwm {
    fn init(&mut self, period_us: u32, pin: Pin, mux_function: u8) {
        self.init = Some((period_us, pin, mux_function));
        self.init_count += 1;
    }

    fn start(&mut self) {
        self.started += 1;
    }

    fn set_period(&mut self, period_us: u32) {
        self.period = Some(period_us);
    }

    fn set_duty(&mut self, duty: u32, channel: u8) {
        self.duty = Some((duty, channel));
    }
}

/// Flash mock backed by RAM; one page larger than the window to catch
/// reads and writes that escape the clip
pub struct MockFlash {
    pub data: Vec<u8>,
    pub erased: Vec<u16>,
    pub writes: Vec<(u32, usize)>,
    pub fail_erase: bool,
    pub fail_write: bool,
}

impl Default for MockFlash {
    fn default() -> Self {
        let size = jsh_core::config::FLASH_WINDOW_SIZE as usize + 4096;
        Self {
            data: (0..size).map(|i| i as u8).collect(),
            erased: Vec::new(),
            writes: Vec::new(),
            fail_erase: false,
            fail_write: false,
        }
    }
}

impl FlashChip for MockFlash {
    fn read_word(&self, addr: u32) -> u32 {
        assert_eq!(addr & 3, 0, "unaligned flash read");
        let at = addr as usize;
        u32::from_le_bytes([
            self.data[at],
            self.data[at + 1],
            self.data[at + 2],
            self.data[at + 3],
        ])
    }

    fn erase_sector(&mut self, sector: u16) -> Result<(), FlashError> {
        if self.fail_erase {
            return Err(FlashError::Timeout);
        }
        self.erased.push(sector);
        let start = sector as usize * 4096;
        self.data[start..start + 4096].fill(0xff);
        Ok(())
    }

    fn write(&mut self, addr: u32, data: &[u8]) -> Result<(), FlashError> {
        if self.fail_write {
            return Err(FlashError::Error);
        }
        self.writes.push((addr, data.len()));
        let start = addr as usize;
        self.data[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockUart {
    pub sent: Vec<(u8, u8)>,
}

impl UartTx for MockUart {
    fn write_byte(&mut self, port: u8, byte: u8) {
        self.sent.push((port, byte));
    }
}

#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

pub struct MockPlatform;

impl Platform for MockPlatform {
    type Gpio = MockGpio;
    type Counters = MockCounters;
    type RtcMemory = MockRtcMemory;
    type System = MockSystem;
    type Interrupts = MockInterrupts;
    type Timer = MockTimer;
    type Spi = MockSpi;
    type I2c = MockI2c;
    type Pwm = MockPwm;
    type Flash = MockFlash;
    type Uart = MockUart;
    type Delay = MockDelay;
}

pub fn peripherals() -> Peripherals<MockPlatform> {
    Peripherals {
        gpio: MockGpio::default(),
        counters: MockCounters::default(),
        rtc_memory: MockRtcMemory::default(),
        system: MockSystem::default(),
        interrupts: MockInterrupts::default(),
        time_timer: MockTimer::default(),
        util_timer: MockTimer::default(),
        spi: MockSpi::default(),
        i2c: MockI2c::default(),
        pwm: MockPwm::default(),
        flash: MockFlash::default(),
        uart: MockUart::default(),
        delay: MockDelay::default(),
    }
}
