//! Board context
//!
//! [`Board`] owns every peripheral handle together with the pin table and
//! the driver state, and exposes the operations the interpreter calls. The
//! clock lives outside the board (usually in a `static`) because the GPIO
//! interrupt reads it without going through the board.
//!
//! # Usage
//!
//! ```ignore
//! static TIME: SystemTime = SystemTime::new(HalConfig::new().rtc_time_slot);
//!
//! let mut board = Board::new(esp8266::peripherals(), &TIME, HalConfig::default());
//! board.init();
//! board.set_pin_state(2, PinState::GpioOut)?;
//! board.set_pin_value(2, true)?;
//! ```

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::String;
use jsh_core::events::{Device, EventId, EventSink};
use jsh_core::pins::{PinState, PinTable};
use jsh_core::time::{time_from_ms, StartKind, SysTime, SystemTime};
use jsh_core::{HalConfig, HalError};
use jsh_hal::{
    AnalogInput, CounterSource, FlashChip, GpioRegisters, HspiBus, I2cLines, InterruptLock, Pin,
    PwmUnit, RtcMemory, SdkTimer, SystemInfo, UartTx,
};

use crate::flash::{FlashPage, FlashWindow};
use crate::gpio;
use crate::i2c::{I2cInfo, I2cMaster};
use crate::pwm::PwmDriver;
use crate::spi::{SpiDriver, SpiInfo};
use crate::timer::UtilTimer;
use crate::uart::{self, TxSource};

/// Pins returned to a pulled-up input by [`Board::reset`]
const RESET_PINS: [Pin; 7] = [0, 4, 5, 12, 13, 14, 15];

/// Length of a MAC address printed as `xx:xx:xx:xx:xx:xx`
pub const SERIAL_NUMBER_LEN: usize = 17;

/// Full-scale reading of the 10-bit ADC
const ADC_FULL_SCALE: f64 = 1024.0;

/// The set of peripheral types a chip backend provides
pub trait Platform {
    type Gpio: GpioRegisters + AnalogInput;
    type Counters: CounterSource;
    type RtcMemory: RtcMemory;
    type System: SystemInfo;
    type Interrupts: InterruptLock;
    type Timer: SdkTimer;
    type Spi: HspiBus;
    type I2c: I2cLines;
    type Pwm: PwmUnit;
    type Flash: FlashChip;
    type Uart: UartTx;
    type Delay: DelayNs;
}

/// Peripheral handles handed to [`Board::new`]
pub struct Peripherals<P: Platform> {
    pub gpio: P::Gpio,
    pub counters: P::Counters,
    pub rtc_memory: P::RtcMemory,
    pub system: P::System,
    pub interrupts: P::Interrupts,
    /// Drives the periodic clock reconciliation
    pub time_timer: P::Timer,
    /// Drives the interpreter's scheduler
    pub util_timer: P::Timer,
    pub spi: P::Spi,
    pub i2c: P::I2c,
    pub pwm: P::Pwm,
    pub flash: P::Flash,
    pub uart: P::Uart,
    pub delay: P::Delay,
}

/// Hardware context for the interpreter
pub struct Board<'t, P: Platform> {
    config: HalConfig,
    time: &'t SystemTime,
    pins: PinTable,

    gpio: P::Gpio,
    counters: P::Counters,
    rtc_memory: P::RtcMemory,
    system: P::System,
    interrupts: P::Interrupts,
    time_timer: P::Timer,
    uart: P::Uart,
    delay: P::Delay,

    util_timer: UtilTimer<P::Timer>,
    spi: SpiDriver<P::Spi>,
    i2c: I2cMaster<P::I2c>,
    pwm: PwmDriver<P::Pwm>,
    flash: FlashWindow<P::Flash>,
}

impl<'t, P: Platform> Board<'t, P> {
    pub fn new(peripherals: Peripherals<P>, time: &'t SystemTime, config: HalConfig) -> Self {
        Self {
            config,
            time,
            pins: PinTable::new(),
            gpio: peripherals.gpio,
            counters: peripherals.counters,
            rtc_memory: peripherals.rtc_memory,
            system: peripherals.system,
            interrupts: peripherals.interrupts,
            time_timer: peripherals.time_timer,
            uart: peripherals.uart,
            delay: peripherals.delay,
            util_timer: UtilTimer::new(peripherals.util_timer),
            spi: SpiDriver::new(peripherals.spi),
            i2c: I2cMaster::new(peripherals.i2c),
            pwm: PwmDriver::new(peripherals.pwm, config.default_pwm_frequency_hz),
            flash: FlashWindow::new(peripherals.flash),
        }
    }

    /// Bring the hardware layer up
    ///
    /// Restores the clock from RTC memory when the reset allows it, starts
    /// the periodic clock reconciliation, disarms the utility timer and
    /// unmasks the GPIO interrupt.
    pub fn init(&mut self) -> StartKind {
        self.pins.clear();

        self.time_timer.disarm();
        self.time_timer
            .arm_ms(self.config.time_update_period_ms, true);
        let start = self
            .time
            .init(&self.counters, &mut self.rtc_memory, self.system.reset_reason());

        self.util_timer.init();
        self.gpio.enable_gpio_interrupts();

        info!("hal initialised ({:?})", start);
        start
    }

    /// Return the board to its post-boot state
    ///
    /// Every user-accessible pin becomes a pulled-up input and the SPI
    /// driver forgets its setup.
    pub fn reset(&mut self) {
        for pin in RESET_PINS {
            if let Err(err) = self.set_pin_state(pin, PinState::GpioInPullup) {
                warn!("reset pin {}: {}", pin, err);
            }
        }
        self.spi.reset();
    }

    /// Periodic clock reconciliation; call from the time timer callback
    pub fn on_time_tick(&mut self) {
        self.time.tick(&self.counters, &mut self.rtc_memory);
    }

    /// Service a GPIO interrupt; see [`gpio::dispatch_interrupt`]
    pub fn on_gpio_interrupt<S: EventSink>(&mut self, mask: u32, sink: &mut S) -> usize {
        gpio::dispatch_interrupt(mask, &mut self.gpio, sink, self.time, &self.counters)
    }

    // --- Pins ---

    pub fn set_pin_state(&mut self, pin: Pin, state: PinState) -> Result<(), HalError> {
        self.pins.set_state(&mut self.gpio, pin, state)
    }

    /// Last state set on `pin`; never reads the hardware
    pub fn pin_state(&self, pin: Pin) -> PinState {
        self.pins.state(pin)
    }

    pub fn set_pin_manual(&mut self, pin: Pin, manual: bool) {
        self.pins.set_manual(pin, manual);
    }

    pub fn is_pin_manual(&self, pin: Pin) -> bool {
        self.pins.is_manual(pin)
    }

    pub fn set_pin_value(&mut self, pin: Pin, value: bool) -> Result<(), HalError> {
        Self::check_pin(pin)?;
        self.gpio.write(pin, value);
        Ok(())
    }

    pub fn pin_value(&self, pin: Pin) -> Result<bool, HalError> {
        Self::check_pin(pin)?;
        Ok(self.gpio.read(pin))
    }

    /// Drive `pin` to `value` for `time_ms`, then to the opposite level
    pub fn pulse_pin(&mut self, pin: Pin, value: bool, time_ms: f64) -> Result<(), HalError> {
        self.set_pin_value(pin, value)?;
        self.delay_us(time_from_ms(time_ms));
        self.set_pin_value(pin, !value)
    }

    /// ADC reading scaled to `[0, 1)`
    ///
    /// The chip has a single ADC input; `pin` is ignored.
    pub fn analog_read(&mut self, _pin: Pin) -> f64 {
        self.gpio.read_adc() as f64 / ADC_FULL_SCALE
    }

    /// Raw ADC reading
    pub fn analog_read_fast(&mut self, _pin: Pin) -> u16 {
        self.gpio.read_adc()
    }

    /// PWM output; see [`PwmDriver::set_output`]
    pub fn analog_output(&mut self, pin: Pin, value: f64, frequency: f64) -> Option<u32> {
        self.pwm.set_output(pin, value, frequency)
    }

    /// Write a DAC channel; the chip has none
    pub fn set_output_value(&mut self, pin: Pin, value: i32) -> Result<(), HalError> {
        warn!("dac output {} on pin {} rejected", value, pin);
        Err(HalError::NoDac)
    }

    /// Die temperature is not readable on this chip
    pub fn read_temperature(&mut self) -> f64 {
        f64::NAN
    }

    /// The ADC is the only analog input, so VRef cannot be sampled
    pub fn read_vref(&mut self) -> f64 {
        f64::NAN
    }

    fn check_pin(pin: Pin) -> Result<(), HalError> {
        if PinTable::is_valid(pin) {
            Ok(())
        } else {
            Err(HalError::InvalidPin(pin))
        }
    }

    // --- Pin watch ---

    pub fn can_watch(&self, pin: Pin) -> bool {
        gpio::can_watch(pin)
    }

    pub fn watch_pin(&mut self, pin: Pin, enable: bool) -> Result<EventId, HalError> {
        gpio::watch_pin(&mut self.gpio, &mut self.pins, pin, enable)
    }

    pub fn watched_pin_state(&self, event: EventId) -> Result<bool, HalError> {
        gpio::watched_pin_state(&self.gpio, event)
    }

    // --- Devices ---

    /// Whether `device` is ready for use
    ///
    /// Only SPI needs an explicit setup; everything else is always ready.
    pub fn is_device_initialised(&self, device: Device) -> bool {
        match device {
            Device::Spi1 => self.spi.is_initialised(),
            _ => true,
        }
    }

    /// Configure SPI; devices other than HSPI are logged and ignored
    pub fn spi_setup(&mut self, device: Device, info: &SpiInfo) {
        self.spi.setup(device, info, self.config.cpu_clock_hz);
    }

    pub fn spi_send(&mut self, device: Device, data: Option<u8>) -> Option<u8> {
        self.spi.send(device, data)
    }

    pub fn spi_send16(&mut self, device: Device, data: u16) {
        self.spi.send16(device, data);
    }

    pub fn spi_set16(&mut self, device: Device, is_16: bool) {
        self.spi.set_16bit(device, is_16);
    }

    pub fn spi_set_receive(&mut self, device: Device, receive: bool) {
        self.spi.set_receive(device, receive);
    }

    pub fn spi_wait(&mut self, device: Device) {
        self.spi.wait(device);
    }

    /// The SPI driver, for `embedded-hal` consumers
    pub fn spi(&mut self) -> &mut SpiDriver<P::Spi> {
        &mut self.spi
    }

    /// Configure the I2C master
    ///
    /// Pins left unset default to the configured SCL/SDA pins; both are
    /// switched to open-drain before the bus is initialised.
    pub fn i2c_setup(&mut self, device: Device, info: &I2cInfo) -> Result<(), HalError> {
        if device != Device::I2c1 {
            return Err(HalError::UnsupportedDevice(device));
        }
        let scl = info.scl.unwrap_or(self.config.default_i2c_scl);
        let sda = info.sda.unwrap_or(self.config.default_i2c_sda);

        // Both pins must pass before either is remuxed
        PinTable::check_state(scl, PinState::I2c)?;
        PinTable::check_state(sda, PinState::I2c)?;

        self.set_pin_state(scl, PinState::I2c)?;
        self.set_pin_state(sda, PinState::I2c)?;
        self.i2c.init(scl, sda, info.bitrate);
        Ok(())
    }

    /// Write to a slave; other I2C devices are ignored
    pub fn i2c_write(
        &mut self,
        device: Device,
        address: u8,
        data: &[u8],
        send_stop: bool,
    ) -> Result<(), HalError> {
        if device != Device::I2c1 {
            return Ok(());
        }
        Ok(self.i2c.write(address, data, send_stop)?)
    }

    /// Read from a slave; other I2C devices are ignored
    pub fn i2c_read(
        &mut self,
        device: Device,
        address: u8,
        buf: &mut [u8],
        send_stop: bool,
    ) -> Result<(), HalError> {
        if device != Device::I2c1 {
            return Ok(());
        }
        Ok(self.i2c.read(address, buf, send_stop)?)
    }

    /// The I2C master, for `embedded-hal` consumers
    pub fn i2c(&mut self) -> &mut I2cMaster<P::I2c> {
        &mut self.i2c
    }

    /// No USB on this chip
    pub fn is_usb_serial_connected(&self) -> bool {
        false
    }

    /// Drain the interpreter's transmit buffer for `device`
    pub fn usart_kick<S: TxSource>(&mut self, device: Device, source: &mut S) -> usize {
        uart::transmit_all(&mut self.uart, source, device)
    }

    // --- Flash ---

    pub fn flash_read(&self, addr: u32, buf: &mut [u8]) -> usize {
        self.flash.read(addr, buf)
    }

    pub fn flash_write(&mut self, addr: u32, data: &[u8]) {
        self.flash.write(addr, data);
    }

    pub fn flash_page(&self, addr: u32) -> Option<FlashPage> {
        self.flash.page(addr)
    }

    pub fn flash_erase_page(&mut self, addr: u32) {
        self.flash.erase_page(addr);
    }

    // --- Time ---

    /// Current time (µs)
    pub fn system_time(&self) -> SysTime {
        self.time.now(&self.counters)
    }

    /// Set the current time (µs) and persist it
    pub fn set_system_time(&mut self, time: SysTime) {
        self.time.set(&self.counters, &mut self.rtc_memory, time);
    }

    /// Busy-wait for `us` microseconds; non-positive values return at once
    pub fn delay_us(&mut self, us: SysTime) {
        if us > 0 {
            self.delay
                .delay_us(us.min(u32::MAX as SysTime) as u32);
        }
    }

    pub fn util_timer_start(&mut self, period: SysTime) {
        self.util_timer.start(period);
    }

    pub fn util_timer_reschedule(&mut self, period: SysTime) {
        self.util_timer.reschedule(period);
    }

    pub fn util_timer_disable(&mut self) {
        self.util_timer.disable();
    }

    /// Call from the utility timer callback
    pub fn on_util_timer(&mut self) {
        self.util_timer.expired();
    }

    // --- System ---

    /// Station MAC address as `xx:xx:xx:xx:xx:xx`
    pub fn serial_number(&self) -> String<SERIAL_NUMBER_LEN> {
        let mut out = String::new();
        for (i, byte) in self.system.station_mac().iter().enumerate() {
            let sep = if i == 0 { "" } else { ":" };
            // Capacity holds exactly six octets
            let _ = write!(out, "{}{:02x}", sep, byte);
        }
        out
    }

    /// Light sleep is not implemented; reports that the caller may sleep
    pub fn sleep(&mut self, _time_us: SysTime) -> bool {
        true
    }

    /// Mask every interrupt until [`Board::interrupt_on`]
    pub fn interrupt_off(&mut self) {
        self.interrupts.lock();
    }

    pub fn interrupt_on(&mut self) {
        self.interrupts.unlock();
    }

    /// Word from the hardware random number generator
    pub fn random_number(&self) -> u32 {
        self.system.random()
    }

    /// The SDK owns the watchdog; requests are only logged
    pub fn enable_watchdog(&mut self, timeout_s: f64) {
        debug!("watchdog request ignored (timeout {}s)", timeout_s);
    }

    pub fn config(&self) -> &HalConfig {
        &self.config
    }

    /// Raw GPIO access
    pub fn gpio(&self) -> &P::Gpio {
        &self.gpio
    }

    pub fn counters(&self) -> &P::Counters {
        &self.counters
    }
}
