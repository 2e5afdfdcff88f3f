//! Analog output over the SDK software PWM
//!
//! The SDK PWM runs one shared period for every channel. The first output
//! on a pin initialises the unit for that pin; later calls only change the
//! duty, and the period when a different non-zero frequency is requested.
//!
//! # Usage
//!
//! ```ignore
//! let mut pwm = PwmDriver::new(sdk_pwm, 1000);
//! pwm.set_output(12, 0.25, 0.0); // 25% at the default 1 kHz
//! ```

use jsh_core::pins::{is_reserved, GPIO_FUNCTION, PIN_COUNT};
use jsh_hal::{Pin, PwmUnit};

/// Duration of one PWM duty tick (µs)
pub const PWM_TICK_US: f64 = 0.045;

/// SDK PWM driver
#[derive(Debug)]
pub struct PwmDriver<P: PwmUnit> {
    unit: P,
    /// Frequency currently programmed into the unit (Hz)
    frequency: u32,
    /// Frequency used when a caller does not ask for one (Hz)
    default_frequency: u32,
    /// Bit per pin: unit initialised for this pin
    enabled: u16,
}

impl<P: PwmUnit> PwmDriver<P> {
    pub fn new(unit: P, default_frequency: u32) -> Self {
        Self {
            unit,
            frequency: 0,
            default_frequency,
            enabled: 0,
        }
    }

    /// Drive `pin` with duty fraction `value`
    ///
    /// A `frequency` of zero (or below) keeps the current frequency, or
    /// the default one on first use. Returns the programmed duty in ticks,
    /// or `None` without touching the hardware when `value` is outside
    /// `[0, 1]` or the pin does not exist or is wired to the flash chip.
    pub fn set_output(&mut self, pin: Pin, value: f64, frequency: f64) -> Option<u32> {
        if !(0.0..=1.0).contains(&value) || pin as usize >= PIN_COUNT {
            return None;
        }
        if is_reserved(pin) {
            warn!("pwm: pin {} is reserved for flash", pin);
            return None;
        }

        // Saturating cast: NaN and negatives become 0
        let requested = frequency as u32;
        let bit = 1u16 << pin;

        if self.enabled & bit == 0 {
            self.frequency = if requested > 0 {
                requested
            } else {
                self.default_frequency
            };
            self.unit.init(
                period_us(self.frequency),
                pin,
                GPIO_FUNCTION[pin as usize],
            );
            self.unit.start();
            self.enabled |= bit;
            debug!("pwm enabled on pin {} at {}Hz", pin, self.frequency);
        } else if requested > 0 && requested != self.frequency {
            self.frequency = requested;
            self.unit.set_period(period_us(requested));
            debug!("pwm frequency now {}Hz", requested);
        }

        let duty = (value * 1_000_000.0 / PWM_TICK_US / self.frequency as f64) as u32;
        self.unit.set_duty(duty, 0);
        Some(duty)
    }

    /// Frequency currently programmed (Hz), zero before first use
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Whether the unit was initialised for `pin`
    pub fn is_enabled(&self, pin: Pin) -> bool {
        (pin as usize) < PIN_COUNT && self.enabled & (1 << pin) != 0
    }

    /// The underlying PWM unit
    pub fn unit(&self) -> &P {
        &self.unit
    }
}

fn period_us(frequency: u32) -> u32 {
    1_000_000 / frequency.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPwm;

    #[test]
    fn test_first_use_initialises() {
        let mut pwm = PwmDriver::new(MockPwm::default(), 1000);

        let duty = pwm.set_output(12, 0.5, 0.0).unwrap();

        assert_eq!(pwm.frequency(), 1000);
        assert_eq!(pwm.unit().init, Some((1000, 12, 3)));
        assert_eq!(pwm.unit().started, 1);
        // 0.5 of 1ms in 45ns ticks
        assert_eq!(duty, 11_111);
        assert_eq!(pwm.unit().duty, Some((11_111, 0)));
        assert!(pwm.is_enabled(12));
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut pwm = PwmDriver::new(MockPwm::default(), 1000);

        assert_eq!(pwm.set_output(12, 1.5, 0.0), None);
        assert_eq!(pwm.set_output(12, -0.1, 0.0), None);
        assert_eq!(pwm.set_output(12, f64::NAN, 0.0), None);
        assert_eq!(pwm.set_output(16, 0.5, 0.0), None);

        assert_eq!(pwm.unit().init_count, 0);
        assert_eq!(pwm.unit().duty, None);
    }

    #[test]
    fn test_flash_pins_never_remuxed() {
        let mut pwm = PwmDriver::new(MockPwm::default(), 1000);

        for pin in 6..=11 {
            assert_eq!(pwm.set_output(pin, 0.5, 0.0), None);
            assert!(!pwm.is_enabled(pin));
        }

        assert_eq!(pwm.unit().init, None);
        assert_eq!(pwm.unit().started, 0);
        assert_eq!(pwm.frequency(), 0);
    }

    #[test]
    fn test_frequency_change_sets_period() {
        let mut pwm = PwmDriver::new(MockPwm::default(), 1000);
        pwm.set_output(4, 0.1, 500.0).unwrap();
        assert_eq!(pwm.unit().init, Some((2000, 4, 0)));

        pwm.set_output(4, 0.1, 500.0).unwrap();
        assert_eq!(pwm.unit().period, None);

        pwm.set_output(4, 0.1, 2000.0).unwrap();
        assert_eq!(pwm.unit().period, Some(500));
        assert_eq!(pwm.unit().init_count, 1);
        assert_eq!(pwm.frequency(), 2000);
    }

    #[test]
    fn test_zero_frequency_keeps_current() {
        let mut pwm = PwmDriver::new(MockPwm::default(), 1000);
        pwm.set_output(5, 0.0, 250.0).unwrap();

        let duty = pwm.set_output(5, 1.0, 0.0).unwrap();

        assert_eq!(pwm.frequency(), 250);
        assert_eq!(pwm.unit().period, None);
        assert_eq!(duty, (1_000_000.0 / PWM_TICK_US / 250.0) as u32);
    }
}
