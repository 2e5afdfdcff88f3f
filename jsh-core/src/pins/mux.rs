//! IO-mux function tables
//!
//! Indexed by GPIO number. GPIO6..11 carry the flash chip and are never
//! switched, so their entries are placeholders.

use jsh_hal::Pin;

use super::{PinState, PIN_COUNT, RESERVED_PINS};

/// IO-mux function that selects plain GPIO for each pin
pub const GPIO_FUNCTION: [u8; PIN_COUNT] = [
    0, // GPIO0
    3, // GPIO1 (U0TXD)
    0, // GPIO2
    3, // GPIO3 (U0RXD)
    0, // GPIO4
    0, // GPIO5
    3, // SD_CLK
    3, // SD_DATA0
    3, // SD_DATA1
    3, // GPIO9 (SD_DATA2)
    3, // GPIO10 (SD_DATA3)
    3, // SD_CMD
    3, // GPIO12 (MTDI)
    3, // GPIO13 (MTCK)
    3, // GPIO14 (MTMS)
    3, // GPIO15 (MTDO)
];

/// IO-mux function that selects the alternate function for each pin
pub const ALT_FUNCTION: [u8; PIN_COUNT] = [
    4, // CLK_OUT
    0, // U0TXD
    2, // U1TXD
    0, // U0RXD
    0, 0, // no alternate function
    0, 0, 0, 0, 0, 0, // flash pins
    2, // HSPI MISO
    2, // HSPI MOSI
    2, // HSPI CLK
    2, // HSPI CS
];

/// Whether the pin is wired to the flash chip
pub fn is_reserved(pin: Pin) -> bool {
    RESERVED_PINS.contains(&pin)
}

/// IO-mux function for putting `pin` into `state`
///
/// Returns `None` for states this chip cannot mux. `pin` must be below
/// [`PIN_COUNT`].
pub fn function_for(pin: Pin, state: PinState) -> Option<u8> {
    let index = pin as usize;
    match state {
        PinState::GpioOut
        | PinState::GpioOutOpenDrain
        | PinState::GpioIn
        | PinState::GpioInPullup
        | PinState::I2c => Some(GPIO_FUNCTION[index]),
        PinState::AfOut | PinState::AfOutOpenDrain => Some(ALT_FUNCTION[index]),
        // UART0 lives on its own pins at function 0, elsewhere function 4 works
        PinState::UsartIn | PinState::UsartOut => Some(if pin == 1 || pin == 3 { 0 } else { 4 }),
        PinState::Undefined | PinState::GpioInPulldown | PinState::AdcIn | PinState::DacOut => {
            None
        }
    }
}
