//! Reset information, MAC address, busy-wait delay and UART output

use embedded_hal::delay::DelayNs;
use jsh_hal::{ResetReason, SystemInfo, UartTx};

use crate::sdk;

#[derive(Debug)]
pub struct Esp8266System {
    _private: (),
}

impl Esp8266System {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl SystemInfo for Esp8266System {
    fn reset_reason(&self) -> ResetReason {
        // SAFETY: the SDK returns a pointer to its static reset record
        let info = unsafe { sdk::system_get_rst_info().as_ref() };
        info.map_or(ResetReason::PowerOn, |info| {
            ResetReason::from_u32(info.reason)
        })
    }

    fn station_mac(&self) -> [u8; 6] {
        let mut mac = [0u8; 6];
        // SAFETY: mac has room for the six bytes the SDK writes
        if !unsafe { sdk::wifi_get_macaddr(sdk::STATION_IF, mac.as_mut_ptr()) } {
            warn!("wifi_get_macaddr failed");
        }
        mac
    }

    fn random(&self) -> u32 {
        // SAFETY: SDK call, reads the hardware RNG register
        unsafe { sdk::os_random() }
    }
}

/// ROM busy-wait
#[derive(Debug)]
pub struct Esp8266Delay {
    _private: (),
}

impl Esp8266Delay {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl DelayNs for Esp8266Delay {
    fn delay_ns(&mut self, ns: u32) {
        // SAFETY: ROM call with no preconditions
        unsafe { sdk::ets_delay_us(ns.div_ceil(1000)) }
    }

    fn delay_us(&mut self, us: u32) {
        // SAFETY: ROM call with no preconditions
        unsafe { sdk::ets_delay_us(us) }
    }
}

/// Blocking UART transmit
#[derive(Debug)]
pub struct Esp8266Uart {
    _private: (),
}

impl Esp8266Uart {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl UartTx for Esp8266Uart {
    fn write_byte(&mut self, port: u8, byte: u8) {
        // SAFETY: driver call; blocks until the FIFO has room
        unsafe {
            sdk::uart_tx_one_char(port, byte);
        }
    }
}
