//! NONOS SDK bindings
//!
//! Only the calls this backend uses. Names follow the SDK headers so they
//! can be grepped against the vendor documentation.

#![allow(non_camel_case_types, non_snake_case)]

use core::ffi::c_void;

/// Interrupt number of the GPIO interrupt
pub const ETS_GPIO_INUM: u32 = 4;

/// `wifi_get_macaddr` interface index of the station
pub const STATION_IF: u8 = 0;

/// `gpio_pin_intr_state_set` trigger types
pub const GPIO_PIN_INTR_DISABLE: u32 = 0;
pub const GPIO_PIN_INTR_ANYEDGE: u32 = 3;

/// HSPI index for the `spi_*` driver calls
pub const HSPI: u8 = 1;

/// Result of a flash operation
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiFlashOpResult {
    Ok = 0,
    Err = 1,
    Timeout = 2,
}

/// `struct rst_info`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct rst_info {
    pub reason: u32,
    pub exccause: u32,
    pub epc1: u32,
    pub epc2: u32,
    pub epc3: u32,
    pub excvaddr: u32,
    pub depc: u32,
}

pub type ETSTimerFunc = unsafe extern "C" fn(arg: *mut c_void);

/// `ETSTimer` / `os_timer_t` control block
#[repr(C)]
pub struct ETSTimer {
    pub timer_next: *mut ETSTimer,
    pub timer_expire: u32,
    pub timer_period: u32,
    pub timer_func: Option<ETSTimerFunc>,
    pub timer_arg: *mut c_void,
}

impl ETSTimer {
    pub const fn new() -> Self {
        Self {
            timer_next: core::ptr::null_mut(),
            timer_expire: 0,
            timer_period: 0,
            timer_func: None,
            timer_arg: core::ptr::null_mut(),
        }
    }
}

pub type GpioIntrHandler = unsafe extern "C" fn(mask: u32, arg: *mut c_void);

extern "C" {
    // System
    pub fn system_get_time() -> u32;
    pub fn system_get_rtc_time() -> u32;
    pub fn system_rtc_clock_cali_proc() -> u32;
    pub fn system_rtc_mem_read(src_addr: u8, des_addr: *mut c_void, load_size: u16) -> bool;
    pub fn system_rtc_mem_write(des_addr: u8, src_addr: *const c_void, save_size: u16) -> bool;
    pub fn system_get_rst_info() -> *const rst_info;
    pub fn system_adc_read() -> u16;
    pub fn os_random() -> u32;
    pub fn wifi_get_macaddr(if_index: u8, macaddr: *mut u8) -> bool;
    /// Switch the SDK timers to microsecond resolution
    pub fn system_timer_reinit();

    // ROM
    pub fn ets_delay_us(us: u32);
    pub fn ets_isr_mask(mask: u32);
    pub fn ets_isr_unmask(mask: u32);
    pub fn ets_timer_setfn(ptimer: *mut ETSTimer, pfunction: ETSTimerFunc, parg: *mut c_void);
    pub fn ets_timer_arm_new(ptimer: *mut ETSTimer, time: u32, repeat_flag: bool, is_ms: bool);
    pub fn ets_timer_disarm(ptimer: *mut ETSTimer);

    // GPIO
    pub fn gpio_intr_handler_register(handler: GpioIntrHandler, arg: *mut c_void);
    pub fn gpio_intr_ack(ack_mask: u32);
    pub fn gpio_pin_intr_state_set(i: u32, intr_state: u32);

    // Flash
    pub fn spi_flash_erase_sector(sec: u16) -> SpiFlashOpResult;
    pub fn spi_flash_write(des_addr: u32, src_addr: *mut u32, size: u32) -> SpiFlashOpResult;

    // PWM (libpwm)
    pub fn pwm_init(period: u32, duty: *mut u32, pwm_channel_num: u32, pin_info_list: *mut [u32; 3]);
    pub fn pwm_start();
    pub fn pwm_set_duty(duty: u32, channel: u8);
    pub fn pwm_set_period(period: u32);

    // HSPI (driver library)
    pub fn spi_init(spi_no: u8);
    pub fn spi_clock(spi_no: u8, prediv: u16, cntdiv: u8);
    pub fn spi_tx8(spi_no: u8, data: u8) -> u8;
    pub fn spi_tx16(spi_no: u8, data: u16);

    // Bit-banged I2C master (driver library)
    pub fn i2c_master_gpio_init(scl: u8, sda: u8, bitrate: u32);
    pub fn i2c_master_start();
    pub fn i2c_master_stop();
    pub fn i2c_master_writeByte(wrdata: u8);
    pub fn i2c_master_readByte() -> u8;
    pub fn i2c_master_checkAck() -> bool;
    pub fn i2c_master_send_ack();
    pub fn i2c_master_send_nack();

    // UART (driver library)
    pub fn uart_tx_one_char(uart: u8, tx_char: u8) -> u32;
}
