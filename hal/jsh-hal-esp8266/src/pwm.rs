//! SDK software PWM

use jsh_hal::{Pin, PwmUnit};

use crate::registers;
use crate::sdk;

#[derive(Debug)]
pub struct Esp8266Pwm {
    _private: (),
}

impl Esp8266Pwm {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl PwmUnit for Esp8266Pwm {
    fn init(&mut self, period_us: u32, pin: Pin, mux_function: u8) {
        let mut duty = 0u32;
        let mut pin_info = [registers::io_mux(pin), mux_function as u32, pin as u32];
        // SAFETY: one channel; the SDK copies both arrays
        unsafe { sdk::pwm_init(period_us, &mut duty, 1, &mut pin_info) }
    }

    fn start(&mut self) {
        // SAFETY: called after pwm_init
        unsafe { sdk::pwm_start() }
    }

    fn set_period(&mut self, period_us: u32) {
        // SAFETY: takes effect at the next pwm_start
        unsafe {
            sdk::pwm_set_period(period_us);
            sdk::pwm_start();
        }
    }

    fn set_duty(&mut self, duty: u32, channel: u8) {
        // SAFETY: takes effect at the next pwm_start
        unsafe {
            sdk::pwm_set_duty(duty, channel);
            sdk::pwm_start();
        }
    }
}
