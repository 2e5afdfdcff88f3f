//! GPIO and ADC

use jsh_hal::{AnalogInput, GpioRegisters, InterruptMode, Pin};

use crate::registers::{self as reg, GPIO_PIN_PAD_DRIVER, IO_MUX_FUNC_MASK, IO_MUX_PULLUP};
use crate::{interrupt, sdk};

/// GPIO register file
///
/// Stateless; any number of handles may exist, and the GPIO interrupt
/// creates its own.
#[derive(Debug)]
pub struct Esp8266Gpio {
    _private: (),
}

impl Esp8266Gpio {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl GpioRegisters for Esp8266Gpio {
    fn select_function(&mut self, pin: Pin, function: u8) {
        // SAFETY: IO-mux register of a valid pin
        unsafe {
            reg::modify(reg::io_mux(pin), |v| {
                (v & !IO_MUX_FUNC_MASK) | reg::mux_bits(function)
            })
        }
    }

    fn set_pullup(&mut self, pin: Pin, enabled: bool) {
        // SAFETY: IO-mux register of a valid pin
        unsafe {
            reg::modify(reg::io_mux(pin), |v| {
                if enabled {
                    v | IO_MUX_PULLUP
                } else {
                    v & !IO_MUX_PULLUP
                }
            })
        }
    }

    fn set_output_enable(&mut self, pin: Pin, enabled: bool) {
        let addr = if enabled {
            reg::GPIO_ENABLE_W1TS
        } else {
            reg::GPIO_ENABLE_W1TC
        };
        // SAFETY: write-1-to-set/clear register
        unsafe { reg::write(addr, 1 << pin) }
    }

    fn set_open_drain(&mut self, pin: Pin, open_drain: bool) {
        let addr = reg::GPIO_PIN0 + 4 * pin as u32;
        // SAFETY: GPIO_PINn register of a valid pin
        unsafe {
            reg::modify(addr, |v| {
                if open_drain {
                    v | GPIO_PIN_PAD_DRIVER
                } else {
                    v & !GPIO_PIN_PAD_DRIVER
                }
            })
        }
    }

    fn write(&mut self, pin: Pin, high: bool) {
        let addr = if high {
            reg::GPIO_OUT_W1TS
        } else {
            reg::GPIO_OUT_W1TC
        };
        // SAFETY: write-1-to-set/clear register
        unsafe { reg::write(addr, 1 << pin) }
    }

    fn read(&self, pin: Pin) -> bool {
        // SAFETY: read-only input register
        unsafe { reg::read(reg::GPIO_IN) >> pin & 1 != 0 }
    }

    fn set_interrupt_mode(&mut self, pin: Pin, mode: InterruptMode) {
        let state = match mode {
            InterruptMode::Disabled => sdk::GPIO_PIN_INTR_DISABLE,
            InterruptMode::AnyEdge => sdk::GPIO_PIN_INTR_ANYEDGE,
        };
        // SAFETY: SDK call on a valid pin
        unsafe { sdk::gpio_pin_intr_state_set(pin as u32, state) }
    }

    fn acknowledge_interrupts(&mut self, mask: u32) {
        // SAFETY: SDK call, writes the status clear register
        unsafe { sdk::gpio_intr_ack(mask) }
    }

    fn disable_gpio_interrupts(&mut self) {
        interrupt::mask_gpio();
    }

    fn enable_gpio_interrupts(&mut self) {
        interrupt::unmask_gpio();
    }
}

impl AnalogInput for Esp8266Gpio {
    fn read_adc(&mut self) -> u16 {
        // SAFETY: SDK call with no preconditions
        unsafe { sdk::system_adc_read() }
    }
}
