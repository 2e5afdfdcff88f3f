//! GPIO, IO-mux and HSPI register map

use jsh_hal::Pin;

/// GPIO block
pub const GPIO_BASE: u32 = 0x6000_0300;
pub const GPIO_OUT_W1TS: u32 = GPIO_BASE + 0x04;
pub const GPIO_OUT_W1TC: u32 = GPIO_BASE + 0x08;
pub const GPIO_ENABLE_W1TS: u32 = GPIO_BASE + 0x10;
pub const GPIO_ENABLE_W1TC: u32 = GPIO_BASE + 0x14;
pub const GPIO_IN: u32 = GPIO_BASE + 0x18;
pub const GPIO_PIN0: u32 = GPIO_BASE + 0x28;

/// Pad driver bit of `GPIO_PINn`: set for open drain
pub const GPIO_PIN_PAD_DRIVER: u32 = 1 << 2;

/// IO-mux block
pub const IO_MUX_BASE: u32 = 0x6000_0800;

/// IO-mux register offset for each GPIO
pub const IO_MUX_OFFSET: [u32; 16] = [
    0x34, // GPIO0_U
    0x18, // U0TXD_U
    0x38, // GPIO2_U
    0x14, // U0RXD_U
    0x3c, // GPIO4_U
    0x40, // GPIO5_U
    0x1c, // SD_CLK_U
    0x20, // SD_DATA0_U
    0x24, // SD_DATA1_U
    0x28, // SD_DATA2_U
    0x2c, // SD_DATA3_U
    0x30, // SD_CMD_U
    0x04, // MTDI_U
    0x08, // MTCK_U
    0x0c, // MTMS_U
    0x10, // MTDO_U
];

pub const IO_MUX_PULLUP: u32 = 1 << 7;
/// Function field: bits 4, 5 and 8
pub const IO_MUX_FUNC_MASK: u32 = 0x13 << 4;

/// HSPI command register; `SPI_USR` is set while a transfer runs
pub const HSPI_CMD: u32 = 0x6000_0100;
pub const SPI_USR: u32 = 1 << 18;

/// Memory-mapped flash
pub const FLASH_MAP_BASE: u32 = 0x4020_0000;

/// IO-mux register of `pin`
pub fn io_mux(pin: Pin) -> u32 {
    IO_MUX_BASE + IO_MUX_OFFSET[pin as usize]
}

/// Function field value for mux function `function` (0..=4)
pub const fn mux_bits(function: u8) -> u32 {
    let function = function as u32;
    (((function & 0b100) << 2) | (function & 0b11)) << 4
}

/// # Safety
///
/// `addr` must be a readable, word-aligned peripheral or mapped address.
#[inline(always)]
pub unsafe fn read(addr: u32) -> u32 {
    core::ptr::read_volatile(addr as *const u32)
}

/// # Safety
///
/// `addr` must be a writable, word-aligned peripheral register.
#[inline(always)]
pub unsafe fn write(addr: u32, value: u32) {
    core::ptr::write_volatile(addr as *mut u32, value)
}

/// # Safety
///
/// As [`read`] and [`write`]; the read-modify-write is not atomic.
#[inline(always)]
pub unsafe fn modify(addr: u32, f: impl FnOnce(u32) -> u32) {
    write(addr, f(read(addr)))
}
