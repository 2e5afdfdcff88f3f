//! UART transmit abstraction

/// Byte-wise UART transmitter
///
/// The SDK call blocks until the FIFO has room.
pub trait UartTx {
    /// Queue one byte for transmission on UART `port`
    fn write_byte(&mut self, port: u8, byte: u8);
}
