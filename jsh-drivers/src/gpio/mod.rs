//! Pin-change watching
//!
//! `watch` arms edge interrupts on a pin; `irq` is the interrupt-side
//! dispatcher that turns pending interrupt bits into queued events.

pub mod irq;
pub mod watch;

pub use irq::dispatch_interrupt;
pub use watch::{can_watch, watch_pin, watched_pin_state};
