//! Pin state table
//!
//! Records the last state requested for each pin. Reading back a state
//! never touches the hardware, so a register changed behind the table's
//! back is not reflected here.

use jsh_hal::{GpioRegisters, Pin};

use super::{function_for, is_reserved, PinState, PIN_COUNT};
use crate::error::HalError;

/// Per-pin configuration cache
#[derive(Debug, Clone)]
pub struct PinTable {
    states: [PinState; PIN_COUNT],
    /// Bit per pin: state was chosen explicitly by the user
    manual: u16,
}

impl Default for PinTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PinTable {
    /// Create a table with every pin undefined
    pub const fn new() -> Self {
        Self {
            states: [PinState::Undefined; PIN_COUNT],
            manual: 0,
        }
    }

    /// Whether `pin` exists on this chip
    pub fn is_valid(pin: Pin) -> bool {
        (pin as usize) < PIN_COUNT
    }

    /// Validate `state` for `pin` and return its IO-mux function
    ///
    /// Lets a caller configuring several pins reject the request before
    /// touching any of them.
    pub fn check_state(pin: Pin, state: PinState) -> Result<u8, HalError> {
        if !Self::is_valid(pin) {
            return Err(HalError::InvalidPin(pin));
        }
        if is_reserved(pin) {
            return Err(HalError::ReservedPin(pin));
        }
        function_for(pin, state).ok_or(HalError::UnsupportedPinState(state))
    }

    /// Configure a pin and record the new state
    ///
    /// Selects the IO-mux function, the pull-up, the output enable and the
    /// drive type. On error nothing has been written and the recorded state
    /// is unchanged.
    pub fn set_state<G: GpioRegisters>(
        &mut self,
        gpio: &mut G,
        pin: Pin,
        state: PinState,
    ) -> Result<(), HalError> {
        let function = Self::check_state(pin, state)?;

        gpio.select_function(pin, function);
        gpio.set_pullup(pin, state.is_pullup());

        if !state.is_output() {
            gpio.set_output_enable(pin, false);
            gpio.set_open_drain(pin, false);
        } else if state.is_open_drain() {
            gpio.set_output_enable(pin, true);
            gpio.set_open_drain(pin, true);
        } else {
            gpio.set_output_enable(pin, true);
            gpio.set_open_drain(pin, false);
        }

        self.states[pin as usize] = state;
        Ok(())
    }

    /// Last state recorded for `pin`
    ///
    /// Out-of-range pins read as [`PinState::Undefined`].
    pub fn state(&self, pin: Pin) -> PinState {
        self.states
            .get(pin as usize)
            .copied()
            .unwrap_or(PinState::Undefined)
    }

    /// Mark whether the pin's state was chosen explicitly by the user
    pub fn set_manual(&mut self, pin: Pin, manual: bool) {
        if Self::is_valid(pin) {
            if manual {
                self.manual |= 1 << pin;
            } else {
                self.manual &= !(1 << pin);
            }
        }
    }

    /// Whether the pin's state was chosen explicitly by the user
    pub fn is_manual(&self, pin: Pin) -> bool {
        Self::is_valid(pin) && self.manual & (1 << pin) != 0
    }

    /// Forget every recorded state and manual flag
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
