//! HSPI driver
//!
//! The interpreter's SPI contract is pipelined: each `send` hands back the
//! byte received by the *previous* transaction, so the first call after a
//! reset returns nothing. The hardware itself transfers synchronously; the
//! lag is emulated by holding the last received byte.

use embedded_hal::spi::{ErrorType, SpiBus};
use jsh_core::events::Device;
use jsh_hal::spi::Mode;
use jsh_hal::{HspiBus, Pin};

/// Largest HSPI clock pre-divider (13-bit field)
const MAX_PREDIV: u32 = 0x2000;

/// Fixed HSPI counter divider
const CNTDIV: u8 = 2;

/// SPI configuration requested by the interpreter
///
/// Only the baud rate is honoured; the HSPI pins are fixed and the SDK
/// driver always runs mode 0, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiInfo {
    pub baud_rate: u32,
    pub mode: Mode,
    pub msb_first: bool,
    pub sck: Option<Pin>,
    pub miso: Option<Pin>,
    pub mosi: Option<Pin>,
}

impl Default for SpiInfo {
    fn default() -> Self {
        Self {
            baud_rate: 100_000,
            mode: Mode::default(),
            msb_first: true,
            sck: None,
            miso: None,
            mosi: None,
        }
    }
}

/// Pipelined HSPI driver
#[derive(Debug)]
pub struct SpiDriver<S: HspiBus> {
    bus: S,
    initialised: bool,
    /// Byte received by the previous transaction
    last_read: Option<u8>,
}

impl<S: HspiBus> SpiDriver<S> {
    pub fn new(bus: S) -> Self {
        Self {
            bus,
            initialised: false,
            last_read: None,
        }
    }

    /// Initialise the bus and program its clock
    ///
    /// The clock is `cpu_clock_hz / (prediv * cntdiv)` with `cntdiv = 2`.
    pub fn setup(&mut self, device: Device, info: &SpiInfo, cpu_clock_hz: u32) -> bool {
        if device != Device::Spi1 {
            warn!("spi setup: {:?} not supported", device);
            return false;
        }

        if info.mode.idle_high() || info.mode.samples_on_trailing_edge() || !info.msb_first {
            warn!("spi: only mode 0 MSB-first is supported, ignoring {:?}", info.mode);
        }

        let prediv = (cpu_clock_hz / info.baud_rate.max(1).saturating_mul(2)).clamp(1, MAX_PREDIV);
        self.bus.init();
        self.bus.set_clock(prediv as u16, CNTDIV);
        self.initialised = true;
        self.last_read = None;

        debug!(
            "spi setup baud={} prediv={} mode={:?}",
            info.baud_rate, prediv, info.mode
        );
        true
    }

    /// Send a byte and return the byte received by the previous send
    ///
    /// With `data == None` nothing is transmitted and the held byte is
    /// returned and cleared. Unsupported devices return `None`.
    pub fn send(&mut self, device: Device, data: Option<u8>) -> Option<u8> {
        if device != Device::Spi1 {
            return None;
        }
        let previous = self.last_read.take();
        if let Some(byte) = data {
            self.last_read = Some(self.bus.transfer8(byte));
        }
        previous
    }

    /// Send a 16-bit word, discarding anything received
    pub fn send16(&mut self, device: Device, data: u16) {
        if device == Device::Spi1 {
            self.bus.write16(data);
        }
    }

    /// Word width is fixed per call on this bus
    pub fn set_16bit(&mut self, _device: Device, _is_16: bool) {}

    /// Receive is always enabled on this bus
    pub fn set_receive(&mut self, _device: Device, _receive: bool) {}

    /// Busy-wait until the bus is idle
    ///
    /// There is no timeout.
    pub fn wait(&mut self, device: Device) {
        if device == Device::Spi1 {
            while self.bus.is_busy() {}
        }
    }

    /// Whether `setup` has run since the last reset
    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// Forget initialisation and any held byte
    pub fn reset(&mut self) {
        self.initialised = false;
        self.last_read = None;
    }

    /// The underlying bus
    pub fn bus(&self) -> &S {
        &self.bus
    }
}

impl<S: HspiBus> ErrorType for SpiDriver<S> {
    type Error = core::convert::Infallible;
}

/// Direct full-duplex access, bypassing the interpreter pipeline
impl<S: HspiBus> SpiBus<u8> for SpiDriver<S> {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words {
            *word = self.bus.transfer8(0);
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for &word in words {
            self.bus.transfer8(word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let len = read.len().max(write.len());
        for i in 0..len {
            let received = self.bus.transfer8(write.get(i).copied().unwrap_or(0));
            if let Some(slot) = read.get_mut(i) {
                *slot = received;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words {
            *word = self.bus.transfer8(*word);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        while self.bus.is_busy() {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSpi;

    fn driver() -> SpiDriver<MockSpi> {
        let mut spi = SpiDriver::new(MockSpi::default());
        assert!(spi.setup(Device::Spi1, &SpiInfo::default(), 80_000_000));
        spi
    }

    #[test]
    fn test_setup_programs_clock() {
        let spi = driver();
        assert!(spi.is_initialised());
        assert_eq!(spi.bus().init_count, 1);
        // 80MHz / (400 * 2) = 100kHz
        assert_eq!(spi.bus().clock, Some((400, 2)));
    }

    #[test]
    fn test_setup_clamps_divider() {
        let mut spi = SpiDriver::new(MockSpi::default());
        let slow = SpiInfo {
            baud_rate: 1,
            ..SpiInfo::default()
        };
        spi.setup(Device::Spi1, &slow, 80_000_000);
        assert_eq!(spi.bus().clock, Some((0x2000, 2)));

        let fast = SpiInfo {
            baud_rate: 80_000_000,
            ..SpiInfo::default()
        };
        spi.setup(Device::Spi1, &fast, 80_000_000);
        assert_eq!(spi.bus().clock, Some((1, 2)));
    }

    #[test]
    fn test_other_devices_rejected() {
        let mut spi = SpiDriver::new(MockSpi::default());
        assert!(!spi.setup(Device::Spi2, &SpiInfo::default(), 80_000_000));
        assert!(!spi.is_initialised());
        assert_eq!(spi.send(Device::Spi2, Some(0x12)), None);
        assert!(spi.bus().sent.is_empty());
    }

    #[test]
    fn test_send_returns_previous_result() {
        let mut spi = driver();

        assert_eq!(spi.send(Device::Spi1, Some(0xAA)), None);
        assert_eq!(spi.send(Device::Spi1, Some(0xBB)), Some(!0xAA));
        assert_eq!(spi.send(Device::Spi1, None), Some(!0xBB));
        assert_eq!(spi.send(Device::Spi1, None), None);
        assert_eq!(spi.bus().sent, vec![0xAA, 0xBB]);
    }

    #[test]
    fn test_send16_and_noops() {
        let mut spi = driver();
        spi.set_16bit(Device::Spi1, true);
        spi.set_receive(Device::Spi1, false);
        spi.send16(Device::Spi1, 0xBEEF);
        assert_eq!(spi.bus().words, vec![0xBEEF]);
        assert!(spi.bus().sent.is_empty());
    }

    #[test]
    fn test_wait_polls_until_idle() {
        let mut spi = driver();
        spi.bus.busy_for.set(3);
        spi.wait(Device::Spi1);
        assert_eq!(spi.bus().polls.get(), 4);
    }

    #[test]
    fn test_reset_clears_pipeline() {
        let mut spi = driver();
        spi.send(Device::Spi1, Some(1));
        spi.reset();
        assert!(!spi.is_initialised());
        assert_eq!(spi.send(Device::Spi1, None), None);
    }

    #[test]
    fn test_spi_bus_transfer() {
        let mut spi = driver();
        let mut read = [0u8; 3];
        SpiBus::transfer(&mut spi, &mut read, &[0x01, 0x02]).unwrap();
        assert_eq!(read, [!0x01, !0x02, !0x00]);

        let mut buf = [0x10, 0x20];
        spi.transfer_in_place(&mut buf).unwrap();
        assert_eq!(buf, [!0x10, !0x20]);
    }
}
