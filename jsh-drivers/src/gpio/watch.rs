//! Arming and disarming pin-change interrupts

use core::ops::{Deref, DerefMut};

use jsh_core::events::{exti_for_pin, EventId};
use jsh_core::pins::{PinState, PinTable};
use jsh_core::HalError;
use jsh_hal::{GpioRegisters, InterruptMode, Pin};

/// GPIO interrupts masked for as long as this guard lives
struct Masked<'a, G: GpioRegisters>(&'a mut G);

impl<'a, G: GpioRegisters> Masked<'a, G> {
    fn new(gpio: &'a mut G) -> Self {
        gpio.disable_gpio_interrupts();
        Self(gpio)
    }
}

impl<G: GpioRegisters> Deref for Masked<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.0
    }
}

impl<G: GpioRegisters> DerefMut for Masked<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.0
    }
}

impl<G: GpioRegisters> Drop for Masked<'_, G> {
    fn drop(&mut self) {
        self.0.enable_gpio_interrupts();
    }
}

/// Whether `pin` can raise pin-change events
pub fn can_watch(pin: Pin) -> bool {
    PinTable::is_valid(pin)
}

/// Start or stop watching a pin for changes
///
/// Enabling configures the pin as a plain input (unless the user set its
/// state explicitly) and arms any-edge interrupts. The GPIO interrupt is
/// masked while the pin is reconfigured.
pub fn watch_pin<G: GpioRegisters>(
    gpio: &mut G,
    pins: &mut PinTable,
    pin: Pin,
    enable: bool,
) -> Result<EventId, HalError> {
    if !can_watch(pin) {
        return Err(HalError::InvalidPin(pin));
    }

    let mut gpio = Masked::new(gpio);
    if enable {
        if !pins.is_manual(pin) {
            pins.set_state(&mut *gpio, pin, PinState::GpioIn)?;
        }
        gpio.set_interrupt_mode(pin, InterruptMode::AnyEdge);
        debug!("watching pin {}", pin);
    } else {
        gpio.set_interrupt_mode(pin, InterruptMode::Disabled);
        debug!("stopped watching pin {}", pin);
    }

    Ok(exti_for_pin(pin))
}

/// Current input level of the pin behind a pin-change event
pub fn watched_pin_state<G: GpioRegisters>(gpio: &G, event: EventId) -> Result<bool, HalError> {
    let pin = event.pin().ok_or(HalError::InvalidEvent)?;
    Ok(gpio.read(pin))
}
