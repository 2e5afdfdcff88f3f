//! Bit-banged I2C through the driver library

use jsh_hal::{I2cLines, Pin};

use crate::sdk;

#[derive(Debug)]
pub struct Esp8266I2c {
    _private: (),
}

impl Esp8266I2c {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

// SAFETY (all calls): the driver bit-bangs the pins passed to
// `i2c_master_gpio_init` and keeps no other state
impl I2cLines for Esp8266I2c {
    fn init(&mut self, scl: Pin, sda: Pin, bitrate: u32) {
        unsafe { sdk::i2c_master_gpio_init(scl, sda, bitrate) }
    }

    fn start(&mut self) {
        unsafe { sdk::i2c_master_start() }
    }

    fn stop(&mut self) {
        unsafe { sdk::i2c_master_stop() }
    }

    fn write_byte(&mut self, byte: u8) {
        unsafe { sdk::i2c_master_writeByte(byte) }
    }

    fn read_byte(&mut self) -> u8 {
        unsafe { sdk::i2c_master_readByte() }
    }

    fn check_ack(&mut self) -> bool {
        unsafe { sdk::i2c_master_checkAck() }
    }

    fn send_ack(&mut self, ack: bool) {
        if ack {
            unsafe { sdk::i2c_master_send_ack() }
        } else {
            unsafe { sdk::i2c_master_send_nack() }
        }
    }
}
