//! Flash window
//!
//! Exposes the first megabyte of SPI flash to the interpreter. Reads go
//! through the memory-mapped cache one aligned word at a time; writes
//! erase the affected pages first. Accesses that run past the window are
//! clipped to it, never wrapped.
//!
//! Programming failures are logged and abandoned: the caller has no way to
//! retry a half-written page, so nothing is propagated.

use jsh_core::config::{FLASH_PAGE_SHIFT, FLASH_PAGE_SIZE, FLASH_WINDOW_SIZE};
use jsh_hal::FlashChip;

/// A flash page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashPage {
    pub start: u32,
    pub size: u32,
}

/// Clip `len` bytes at `addr` to the window
fn clip(addr: u32, len: usize) -> usize {
    if addr >= FLASH_WINDOW_SIZE {
        return 0;
    }
    len.min((FLASH_WINDOW_SIZE - addr) as usize)
}

/// The interpreter's view of the flash chip
#[derive(Debug)]
pub struct FlashWindow<F: FlashChip> {
    chip: F,
}

impl<F: FlashChip> FlashWindow<F> {
    pub fn new(chip: F) -> Self {
        Self { chip }
    }

    /// Copy bytes starting at `addr` into `buf`
    ///
    /// Returns the number of bytes copied, which is less than `buf.len()`
    /// when the read runs past the window.
    pub fn read(&self, addr: u32, buf: &mut [u8]) -> usize {
        let len = clip(addr, buf.len());
        let mut word = 0u32;
        for (i, byte) in buf[..len].iter_mut().enumerate() {
            let at = addr + i as u32;
            if i == 0 || at & 3 == 0 {
                word = self.chip.read_word(at & !3);
            }
            *byte = word.to_le_bytes()[(at & 3) as usize];
        }
        len
    }

    /// Program `data` at `addr`
    ///
    /// `addr` and `data.len()` must be multiples of 4. Every page the write
    /// touches is erased first, including the bytes of those pages outside
    /// `data`.
    pub fn write(&mut self, addr: u32, data: &[u8]) {
        let len = clip(addr, data.len());
        if len == 0 {
            return;
        }

        let first = addr >> FLASH_PAGE_SHIFT;
        let last = (addr + len as u32 - 1) >> FLASH_PAGE_SHIFT;
        for sector in first..=last {
            if let Err(err) = self.chip.erase_sector(sector as u16) {
                error!("flash: erase of sector {} failed: {}", sector, err);
                return;
            }
        }

        if let Err(err) = self.chip.write(addr, &data[..len]) {
            error!("flash: write of {} bytes at {:x} failed: {}", len, addr, err);
        }
    }

    /// The page containing `addr`, if it is inside the window
    pub fn page(&self, addr: u32) -> Option<FlashPage> {
        (addr < FLASH_WINDOW_SIZE).then(|| FlashPage {
            start: addr & !(FLASH_PAGE_SIZE - 1),
            size: FLASH_PAGE_SIZE,
        })
    }

    /// Erase the page containing `addr`
    pub fn erase_page(&mut self, addr: u32) {
        let Some(page) = self.page(addr) else {
            return;
        };
        let sector = page.start >> FLASH_PAGE_SHIFT;
        if let Err(err) = self.chip.erase_sector(sector as u16) {
            error!("flash: erase of sector {} failed: {}", sector, err);
        }
    }

    /// The underlying flash chip
    pub fn chip(&self) -> &F {
        &self.chip
    }
}
