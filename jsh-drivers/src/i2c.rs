//! Bit-banged I2C master
//!
//! Transactions abort on the first missing ACK: a stop condition is sent
//! and no further bytes are clocked. A stop is also sent at the end of a
//! transaction only when the caller asks for one, so register reads can
//! use a repeated start.

use core::fmt;

use embedded_hal::i2c::{self as hal_i2c, ErrorKind, NoAcknowledgeSource, Operation};
use jsh_core::error::NackSource;
use jsh_core::HalError;
use jsh_hal::i2c::STANDARD_MODE_HZ;
use jsh_hal::{I2cLines, Pin};

/// I2C configuration requested by the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cInfo {
    pub bitrate: u32,
    pub scl: Option<Pin>,
    pub sda: Option<Pin>,
}

impl Default for I2cInfo {
    fn default() -> Self {
        Self {
            bitrate: STANDARD_MODE_HZ,
            scl: None,
            sda: None,
        }
    }
}

/// I2C transaction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Slave did not acknowledge
    Nack(NackSource),
}

impl fmt::Display for I2cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            I2cError::Nack(NackSource::Address) => f.write_str("address not acknowledged"),
            I2cError::Nack(NackSource::Data) => f.write_str("data not acknowledged"),
        }
    }
}

impl From<I2cError> for HalError {
    fn from(err: I2cError) -> Self {
        match err {
            I2cError::Nack(source) => HalError::I2cNack(source),
        }
    }
}

impl hal_i2c::Error for I2cError {
    fn kind(&self) -> ErrorKind {
        match self {
            I2cError::Nack(NackSource::Address) => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            }
            I2cError::Nack(NackSource::Data) => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
        }
    }
}

/// I2C master over the SDK bit-bang driver
#[derive(Debug)]
pub struct I2cMaster<L: I2cLines> {
    lines: L,
}

impl<L: I2cLines> I2cMaster<L> {
    pub fn new(lines: L) -> Self {
        Self { lines }
    }

    /// Initialise the bus on the given pins
    pub fn init(&mut self, scl: Pin, sda: Pin, bitrate: u32) {
        self.lines.init(scl, sda, bitrate);
        debug!("i2c scl={} sda={} bitrate={}", scl, sda, bitrate);
    }

    /// Write `data` to the 7-bit `address`
    pub fn write(&mut self, address: u8, data: &[u8], send_stop: bool) -> Result<(), I2cError> {
        self.address(address, false)?;
        self.write_bytes(data)?;
        if send_stop {
            self.lines.stop();
        }
        Ok(())
    }

    /// Read `buf.len()` bytes from the 7-bit `address`
    ///
    /// Every byte but the last is acknowledged.
    pub fn read(&mut self, address: u8, buf: &mut [u8], send_stop: bool) -> Result<(), I2cError> {
        self.address(address, true)?;
        self.read_bytes(buf, true);
        if send_stop {
            self.lines.stop();
        }
        Ok(())
    }

    fn address(&mut self, address: u8, read: bool) -> Result<(), I2cError> {
        self.lines.start();
        self.lines.write_byte((address << 1) | read as u8);
        if !self.lines.check_ack() {
            return Err(self.abort(NackSource::Address));
        }
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), I2cError> {
        for &byte in data {
            self.lines.write_byte(byte);
            if !self.lines.check_ack() {
                return Err(self.abort(NackSource::Data));
            }
        }
        Ok(())
    }

    /// Clock in `buf`; NACK the final byte when `last` ends the read run
    fn read_bytes(&mut self, buf: &mut [u8], last: bool) {
        let len = buf.len();
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.lines.read_byte();
            self.lines.send_ack(!(last && i + 1 == len));
        }
    }

    fn abort(&mut self, source: NackSource) -> I2cError {
        self.lines.stop();
        warn!("i2c: no ACK ({:?})", source);
        I2cError::Nack(source)
    }

    /// The underlying bit-bang lines
    pub fn lines(&self) -> &L {
        &self.lines
    }
}

impl<L: I2cLines> hal_i2c::ErrorType for I2cMaster<L> {
    type Error = I2cError;
}

impl<L: I2cLines> hal_i2c::I2c for I2cMaster<L> {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let count = operations.len();
        let mut previous_read: Option<bool> = None;

        for i in 0..count {
            let next_read = operations
                .get(i + 1)
                .map(|op| matches!(op, Operation::Read(_)));
            match &mut operations[i] {
                Operation::Write(data) => {
                    if previous_read != Some(false) {
                        self.address(address, false)?;
                    }
                    self.write_bytes(data)?;
                    previous_read = Some(false);
                }
                Operation::Read(buf) => {
                    if previous_read != Some(true) {
                        self.address(address, true)?;
                    }
                    self.read_bytes(buf, next_read != Some(true));
                    previous_read = Some(true);
                }
            }
        }

        if previous_read.is_some() {
            self.lines.stop();
        }
        Ok(())
    }
}
