//! UART transmit pump
//!
//! The interpreter buffers outgoing characters per device. Kicking a
//! device drains its buffer synchronously into UART0.

use jsh_core::events::Device;
use jsh_hal::UartTx;

/// UART all console output goes to
pub const CONSOLE_PORT: u8 = 0;

/// Source of characters waiting to be transmitted
pub trait TxSource {
    /// Next character queued for `device`, or `None` when drained
    fn next_char(&mut self, device: Device) -> Option<u8>;
}

/// Drain everything queued for `device`; returns the number of bytes sent
pub fn transmit_all<U: UartTx, S: TxSource>(uart: &mut U, source: &mut S, device: Device) -> usize {
    let mut sent = 0;
    while let Some(byte) = source.next_char(device) {
        uart.write_byte(CONSOLE_PORT, byte);
        sent += 1;
    }
    sent
}
