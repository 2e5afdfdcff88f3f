//! SPI flash: memory-mapped reads, SDK erase and write

use jsh_hal::{FlashChip, FlashError};

use crate::registers::{self as reg, FLASH_MAP_BASE};
use crate::sdk::{self, SpiFlashOpResult};

/// Words staged per `spi_flash_write` call
const STAGE_WORDS: usize = 64;

fn check(result: SpiFlashOpResult) -> Result<(), FlashError> {
    match result {
        SpiFlashOpResult::Ok => Ok(()),
        SpiFlashOpResult::Err => Err(FlashError::Error),
        SpiFlashOpResult::Timeout => Err(FlashError::Timeout),
    }
}

#[derive(Debug)]
pub struct Esp8266Flash {
    _private: (),
}

impl Esp8266Flash {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl FlashChip for Esp8266Flash {
    fn read_word(&self, addr: u32) -> u32 {
        // SAFETY: the caller keeps addr aligned and inside the mapped megabyte
        unsafe { reg::read(FLASH_MAP_BASE + addr) }
    }

    fn erase_sector(&mut self, sector: u16) -> Result<(), FlashError> {
        // SAFETY: SDK call; suspends the flash cache while it runs
        check(unsafe { sdk::spi_flash_erase_sector(sector) })
    }

    /// `data` need not be aligned in RAM; it is staged through an aligned
    /// buffer in blocks of 256 bytes.
    fn write(&mut self, addr: u32, data: &[u8]) -> Result<(), FlashError> {
        let mut stage = [0u32; STAGE_WORDS];
        let mut offset = addr;
        for block in data.chunks(STAGE_WORDS * 4) {
            let words = block.len().div_ceil(4);
            for (word, bytes) in stage.iter_mut().zip(block.chunks(4)) {
                let mut le = [0xff; 4];
                le[..bytes.len()].copy_from_slice(bytes);
                *word = u32::from_le_bytes(le);
            }
            // SAFETY: stage is word-aligned and holds `words` valid words
            check(unsafe {
                sdk::spi_flash_write(offset, stage.as_mut_ptr(), (words * 4) as u32)
            })?;
            offset += block.len() as u32;
        }
        Ok(())
    }
}
