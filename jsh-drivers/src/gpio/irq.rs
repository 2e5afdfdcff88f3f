//! GPIO interrupt dispatcher
//!
//! Runs in interrupt context. It must not allocate, block or take any lock
//! the foreground could be holding.

use jsh_core::events::{exti_for_pin, EventSink, IoEvent};
use jsh_core::pins::PIN_COUNT;
use jsh_core::time::SystemTime;
use jsh_hal::{CounterSource, GpioRegisters, InterruptMode};

/// Handle a GPIO interrupt
///
/// Acknowledges every pending bit first so edges arriving while events are
/// queued raise a fresh interrupt, then queues one time-stamped event per
/// pending pin and re-arms its edge trigger. Bits above the last GPIO are
/// acknowledged and ignored. Returns the number of events queued.
pub fn dispatch_interrupt<G, S, C>(
    mask: u32,
    gpio: &mut G,
    sink: &mut S,
    time: &SystemTime,
    counters: &C,
) -> usize
where
    G: GpioRegisters,
    S: EventSink,
    C: CounterSource,
{
    gpio.acknowledge_interrupts(mask);

    let time_us = time.now(counters) as u64;
    let mut queued = 0;
    for pin in 0..PIN_COUNT as u8 {
        if mask & (1 << pin) == 0 {
            continue;
        }
        let event = IoEvent {
            id: exti_for_pin(pin),
            time_us,
        };
        if sink.push(event) {
            queued += 1;
        }
        gpio.set_interrupt_mode(pin, InterruptMode::AnyEdge);
    }
    queued
}
