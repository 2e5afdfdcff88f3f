//! Persisted time record in RTC user memory
//!
//! Layout (16 bytes, little-endian):
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 8 | logical time (µs, i64) |
//! | 8 | 4 | RTC counter at that time |
//! | 12 | 4 | checksum |

use jsh_hal::RtcMemory;

use super::stamp::TimeStamp;

/// Sentinel mixed into the checksum
pub const MAGIC: u32 = 0xdead_beef;

/// Size of the record in bytes
pub const PERSISTED_SIZE: usize = 16;

/// A [`TimeStamp`] with its checksum, as stored in RTC memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedTimeStamp {
    pub stamp: TimeStamp,
    pub checksum: u32,
}

impl PersistedTimeStamp {
    /// Checksum of a stamp: `MAGIC ^ counter ^ low32 ^ high32`
    pub fn checksum_of(stamp: &TimeStamp) -> u32 {
        let logical = stamp.logical_us as u64;
        MAGIC ^ stamp.counter ^ (logical as u32) ^ ((logical >> 32) as u32)
    }

    /// Seal a stamp with its checksum
    pub fn seal(stamp: TimeStamp) -> Self {
        Self {
            stamp,
            checksum: Self::checksum_of(&stamp),
        }
    }

    /// The stamp, if the checksum matches
    pub fn verify(&self) -> Option<TimeStamp> {
        (self.checksum == Self::checksum_of(&self.stamp)).then_some(self.stamp)
    }

    /// Encode into the RTC memory layout
    pub fn to_bytes(&self) -> [u8; PERSISTED_SIZE] {
        let mut bytes = [0u8; PERSISTED_SIZE];
        bytes[0..8].copy_from_slice(&self.stamp.logical_us.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.stamp.counter.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.checksum.to_le_bytes());
        bytes
    }

    /// Decode from the RTC memory layout
    pub fn from_bytes(bytes: &[u8; PERSISTED_SIZE]) -> Self {
        let mut logical = [0u8; 8];
        let mut counter = [0u8; 4];
        let mut checksum = [0u8; 4];
        logical.copy_from_slice(&bytes[0..8]);
        counter.copy_from_slice(&bytes[8..12]);
        checksum.copy_from_slice(&bytes[12..16]);
        Self {
            stamp: TimeStamp::new(i64::from_le_bytes(logical), u32::from_le_bytes(counter)),
            checksum: u32::from_le_bytes(checksum),
        }
    }

    /// Read the record at word offset `slot`
    pub fn load<M: RtcMemory>(memory: &mut M, slot: u8) -> Self {
        let mut bytes = [0u8; PERSISTED_SIZE];
        memory.read(slot, &mut bytes);
        Self::from_bytes(&bytes)
    }

    /// Seal `stamp` and write it at word offset `slot`
    pub fn store<M: RtcMemory>(memory: &mut M, slot: u8, stamp: TimeStamp) {
        memory.write(slot, &Self::seal(stamp).to_bytes());
    }
}
