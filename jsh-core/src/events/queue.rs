//! Single-producer / single-consumer event handoff
//!
//! The GPIO interrupt owns the producer half, the interpreter's idle loop
//! owns the consumer half. Neither side blocks or allocates.

use heapless::spsc::{Producer, Queue};

use super::IoEvent;

/// Default queue size (holds one fewer event than this)
pub const DEFAULT_QUEUE_SIZE: usize = 16;

/// Backing storage for the event handoff
pub type EventQueue<const N: usize = DEFAULT_QUEUE_SIZE> = Queue<IoEvent, N>;

/// Destination for events raised in interrupt context
pub trait EventSink {
    /// Push an event; returns `false` if it was dropped because the queue is full
    fn push(&mut self, event: IoEvent) -> bool;
}

impl<const N: usize> EventSink for Producer<'_, IoEvent, N> {
    fn push(&mut self, event: IoEvent) -> bool {
        self.enqueue(event).is_ok()
    }
}

/// Unsplit queue, for a queue shared behind a lock
impl<const N: usize> EventSink for Queue<IoEvent, N> {
    fn push(&mut self, event: IoEvent) -> bool {
        self.enqueue(event).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventId;

    #[test]
    fn test_producer_consumer_handoff() {
        let mut queue: EventQueue<4> = Queue::new();
        let (mut producer, mut consumer) = queue.split();

        for line in 0..3 {
            assert!(producer.push(IoEvent {
                id: EventId::Exti(line),
                time_us: line as u64,
            }));
        }
        // Capacity is N - 1
        assert!(!producer.push(IoEvent {
            id: EventId::Exti(3),
            time_us: 3,
        }));

        assert_eq!(consumer.dequeue().map(|e| e.id), Some(EventId::Exti(0)));
        assert_eq!(consumer.dequeue().map(|e| e.id), Some(EventId::Exti(1)));
        assert_eq!(consumer.dequeue().map(|e| e.id), Some(EventId::Exti(2)));
        assert!(consumer.dequeue().is_none());
    }

    #[test]
    fn test_unsplit_queue_sink() {
        let mut queue: EventQueue<2> = Queue::new();
        let event = IoEvent {
            id: EventId::Exti(5),
            time_us: 7,
        };
        assert!(queue.push(event));
        assert!(!queue.push(event));
        assert_eq!(queue.dequeue(), Some(event));
    }
}
