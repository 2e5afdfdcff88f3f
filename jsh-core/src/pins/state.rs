//! Pin state values

use core::fmt;

/// Requested configuration of a pin
///
/// Discriminants match the interpreter's pin state numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinState {
    /// Never configured
    #[default]
    Undefined = 0,
    /// Push-pull output
    GpioOut = 1,
    /// Open-drain output
    GpioOutOpenDrain = 2,
    /// Floating input
    GpioIn = 3,
    /// Input with pull-up
    GpioInPullup = 4,
    /// Input with pull-down (no hardware support on this chip)
    GpioInPulldown = 5,
    /// Analog input
    AdcIn = 6,
    /// Alternate function output
    AfOut = 7,
    /// Alternate function open-drain output
    AfOutOpenDrain = 8,
    /// UART receive
    UsartIn = 9,
    /// UART transmit
    UsartOut = 10,
    /// DAC output (no hardware support on this chip)
    DacOut = 11,
    /// I2C line (open-drain)
    I2c = 12,
}

impl PinState {
    /// Whether the state drives the pin
    pub fn is_output(self) -> bool {
        matches!(
            self,
            PinState::GpioOut
                | PinState::GpioOutOpenDrain
                | PinState::AfOut
                | PinState::AfOutOpenDrain
                | PinState::UsartOut
                | PinState::DacOut
                | PinState::I2c
        )
    }

    /// Whether the output driver is open-drain
    pub fn is_open_drain(self) -> bool {
        matches!(
            self,
            PinState::GpioOutOpenDrain | PinState::AfOutOpenDrain | PinState::I2c
        )
    }

    /// Whether the internal pull-up is enabled
    pub fn is_pullup(self) -> bool {
        self == PinState::GpioInPullup
    }

    /// Upper-case name used in debug output
    pub fn name(self) -> &'static str {
        match self {
            PinState::Undefined => "UNDEFINED",
            PinState::GpioOut => "GPIO_OUT",
            PinState::GpioOutOpenDrain => "GPIO_OUT_OPENDRAIN",
            PinState::GpioIn => "GPIO_IN",
            PinState::GpioInPullup => "GPIO_IN_PULLUP",
            PinState::GpioInPulldown => "GPIO_IN_PULLDOWN",
            PinState::AdcIn => "ADC_IN",
            PinState::AfOut => "AF_OUT",
            PinState::AfOutOpenDrain => "AF_OUT_OPENDRAIN",
            PinState::UsartIn => "USART_IN",
            PinState::UsartOut => "USART_OUT",
            PinState::DacOut => "DAC_OUT",
            PinState::I2c => "I2C",
        }
    }
}

impl fmt::Display for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants() {
        assert_eq!(PinState::GpioInPulldown as u8, 5);
        assert_eq!(PinState::I2c as u8, 12);
    }

    #[test]
    fn test_drive_predicates() {
        assert!(PinState::GpioOut.is_output());
        assert!(!PinState::GpioOut.is_open_drain());
        assert!(PinState::I2c.is_output());
        assert!(PinState::I2c.is_open_drain());
        assert!(!PinState::GpioInPullup.is_output());
        assert!(PinState::GpioInPullup.is_pullup());
        assert!(!PinState::GpioIn.is_pullup());
    }
}
