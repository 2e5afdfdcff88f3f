//! Static state and SDK callback trampolines

use core::cell::{Cell, RefCell};
use core::ffi::c_void;

use critical_section::Mutex;
use jsh_core::events::{EventQueue, IoEvent};
use jsh_core::time::SystemTime;
use jsh_core::HalConfig;
use jsh_drivers::{dispatch_interrupt, Peripherals, Platform};
use portable_atomic::{AtomicBool, Ordering};

use crate::clock::{Esp8266Counters, Esp8266RtcMemory};
use crate::flash::Esp8266Flash;
use crate::gpio::Esp8266Gpio;
use crate::i2c::Esp8266I2c;
use crate::interrupt::Esp8266Interrupts;
use crate::pwm::Esp8266Pwm;
use crate::sdk;
use crate::spi::Esp8266Hspi;
use crate::system::{Esp8266Delay, Esp8266System, Esp8266Uart};
use crate::timer::{Esp8266Timer, TimerBlock};

/// The system clock; read lock-free by the GPIO interrupt
static TIME: SystemTime = SystemTime::new(HalConfig::new().rtc_time_slot);

/// Pin-change events waiting for the interpreter
static EVENTS: Mutex<RefCell<EventQueue>> = Mutex::new(RefCell::new(EventQueue::new()));

/// Interpreter callback run when the utility timer fires
static UTIL_HANDLER: Mutex<Cell<Option<fn()>>> = Mutex::new(Cell::new(None));

static TIME_TIMER: TimerBlock = TimerBlock::new();
static UTIL_TIMER: TimerBlock = TimerBlock::new();

static TAKEN: AtomicBool = AtomicBool::new(false);

/// The ESP8266 peripheral set
pub struct Esp8266;

impl Platform for Esp8266 {
    type Gpio = Esp8266Gpio;
    type Counters = Esp8266Counters;
    type RtcMemory = Esp8266RtcMemory;
    type System = Esp8266System;
    type Interrupts = Esp8266Interrupts;
    type Timer = Esp8266Timer;
    type Spi = Esp8266Hspi;
    type I2c = Esp8266I2c;
    type Pwm = Esp8266Pwm;
    type Flash = Esp8266Flash;
    type Uart = Esp8266Uart;
    type Delay = Esp8266Delay;
}

/// Claim the peripherals
///
/// Returns `None` after the first call. Binds the SDK timer callbacks and
/// registers the GPIO interrupt handler; the interrupt stays masked until
/// `Board::init`. `on_util_timer` runs in the SDK task whenever the
/// utility timer fires and should end up in `Board::on_util_timer`.
pub fn take(on_util_timer: fn()) -> Option<Peripherals<Esp8266>> {
    if TAKEN.swap(true, Ordering::AcqRel) {
        return None;
    }

    critical_section::with(|cs| UTIL_HANDLER.borrow(cs).set(Some(on_util_timer)));

    // SAFETY: runs once, before any timer is armed
    unsafe {
        sdk::system_timer_reinit();
        sdk::gpio_intr_handler_register(gpio_isr, core::ptr::null_mut());
    }

    Some(Peripherals {
        gpio: Esp8266Gpio::new(),
        counters: Esp8266Counters::new(),
        rtc_memory: Esp8266RtcMemory::new(),
        system: Esp8266System::new(),
        interrupts: Esp8266Interrupts::new(),
        time_timer: Esp8266Timer::bind(&TIME_TIMER, time_tick),
        util_timer: Esp8266Timer::bind(&UTIL_TIMER, util_timer_fired),
        spi: Esp8266Hspi::new(),
        i2c: Esp8266I2c::new(),
        pwm: Esp8266Pwm::new(),
        flash: Esp8266Flash::new(),
        uart: Esp8266Uart::new(),
        delay: Esp8266Delay::new(),
    })
}

/// The system clock shared with the GPIO interrupt
pub fn time() -> &'static SystemTime {
    &TIME
}

/// Oldest pin-change event not yet handed to the interpreter
pub fn next_event() -> Option<IoEvent> {
    critical_section::with(|cs| EVENTS.borrow_ref_mut(cs).dequeue())
}

unsafe extern "C" fn gpio_isr(mask: u32, _arg: *mut c_void) {
    let mut gpio = Esp8266Gpio::new();
    let counters = Esp8266Counters::new();
    critical_section::with(|cs| {
        let mut events = EVENTS.borrow_ref_mut(cs);
        dispatch_interrupt(mask, &mut gpio, &mut *events, &TIME, &counters);
    });
}

unsafe extern "C" fn time_tick(_arg: *mut c_void) {
    TIME.tick(&Esp8266Counters::new(), &mut Esp8266RtcMemory::new());
}

unsafe extern "C" fn util_timer_fired(_arg: *mut c_void) {
    let handler = critical_section::with(|cs| UTIL_HANDLER.borrow(cs).get());
    if let Some(handler) = handler {
        handler();
    }
}
