//! System time service
//!
//! Fuses the ESP8266's two hardware counters into one monotonic 64-bit
//! microsecond clock:
//!
//! - the **system counter** ticks every microsecond but restarts on every
//!   reset and wraps every ~71 minutes;
//! - the **RTC counter** is coarse (tens of µs per tick, calibrated at
//!   runtime) but keeps running through sleep and soft resets.
//!
//! Reads use the system counter. A periodic tick folds elapsed system
//! counter time into the stamp (so a wrap is never missed) and records the
//! matching RTC counter value in RTC user memory. At startup that record
//! lets the clock resume across a soft reset.

pub mod cell;
pub mod convert;
pub mod persist;
pub mod service;
pub mod stamp;

pub use cell::StampCell;
pub use convert::{ms_from_time, time_from_ms};
pub use persist::{PersistedTimeStamp, MAGIC, PERSISTED_SIZE};
pub use service::{StartKind, SystemTime};
pub use stamp::{wrap_delta, SysTime, TimeStamp};
