//! GPIO and IO-mux abstractions
//!
//! Provides the register-level capabilities the pin state table and the
//! watch dispatcher need. Implementations perform the raw register writes
//! for the ESP8266 (or record them, in host tests).

/// Pin number (GPIO0..GPIO15)
pub type Pin = u8;

/// Edge interrupt configuration for a single pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptMode {
    /// No interrupt generated
    Disabled,
    /// Interrupt on rising and falling edges
    AnyEdge,
}

/// IO-mux and GPIO register access
///
/// All methods take a pin number that the caller has already validated.
pub trait GpioRegisters {
    /// Select the IO-mux function for the pin
    fn select_function(&mut self, pin: Pin, function: u8);

    /// Enable or disable the internal pull-up
    fn set_pullup(&mut self, pin: Pin, enabled: bool);

    /// Enable or disable the output driver
    fn set_output_enable(&mut self, pin: Pin, enabled: bool);

    /// Choose open-drain (`true`) or totem-pole (`false`) drive
    fn set_open_drain(&mut self, pin: Pin, open_drain: bool);

    /// Drive the output latch high or low
    fn write(&mut self, pin: Pin, high: bool);

    /// Read the input level
    ///
    /// Must be callable from interrupt context.
    fn read(&self, pin: Pin) -> bool;

    /// Configure the edge interrupt for the pin
    fn set_interrupt_mode(&mut self, pin: Pin, mode: InterruptMode);

    /// Acknowledge the pending interrupts in `mask`
    fn acknowledge_interrupts(&mut self, mask: u32);

    /// Mask the GPIO interrupt at the CPU
    fn disable_gpio_interrupts(&mut self);

    /// Unmask the GPIO interrupt at the CPU
    fn enable_gpio_interrupts(&mut self);
}

/// The single ADC input (TOUT)
pub trait AnalogInput {
    /// Read the raw 10-bit conversion result
    fn read_adc(&mut self) -> u16;
}
