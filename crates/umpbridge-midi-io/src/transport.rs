//! The transport seam and an in-memory lock-free loopback.
//!
//! A platform MIDI service sits behind [`PacketTransport`]. The loopback
//! channel stands in for it when both ends live in one process.

use ringbuf::{traits::*, HeapCons, HeapProd, HeapRb};

use crate::error::{Error, Result};
use crate::event_list::UmpEventList;

const DEFAULT_CAPACITY: usize = 256;

/// Accepts event lists for delivery, in order.
pub trait PacketTransport {
    fn send(&mut self, list: UmpEventList) -> Result<()>;
}

/// Collects everything sent, in order.
impl PacketTransport for Vec<UmpEventList> {
    fn send(&mut self, list: UmpEventList) -> Result<()> {
        self.push(list);
        Ok(())
    }
}

/// Sending end of the loopback. Implements [`PacketTransport`].
pub struct UmpProducer {
    producer: HeapProd<UmpEventList>,
}

impl UmpProducer {
    /// Queues `list`, handing it back when no slot is free.
    #[inline]
    pub fn push(&mut self, list: UmpEventList) -> std::result::Result<(), UmpEventList> {
        self.producer.try_push(list)
    }

    /// True when the next `push` would be refused.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.producer.is_full()
    }
}

impl PacketTransport for UmpProducer {
    fn send(&mut self, list: UmpEventList) -> Result<()> {
        self.push(list).map_err(|_| Error::TransportFull)
    }
}

/// Receiving end of the loopback. Lists come out in the order they were sent.
pub struct UmpConsumer {
    consumer: HeapCons<UmpEventList>,
}

impl UmpConsumer {
    /// Oldest queued event list, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<UmpEventList> {
        self.consumer.try_pop()
    }

    /// Takes every queued event list, leaving the ring empty for the sender.
    pub fn drain_all(&mut self) -> Vec<UmpEventList> {
        let mut lists = Vec::with_capacity(self.consumer.occupied_len());
        while let Some(list) = self.consumer.try_pop() {
            lists.push(list);
        }
        lists
    }

    /// True while at least one event list waits to be received.
    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.consumer.is_empty()
    }

    /// Number of queued event lists.
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.consumer.occupied_len()
    }
}

/// Loopback holding up to 256 event lists.
pub fn ump_channel() -> (UmpProducer, UmpConsumer) {
    split(HeapRb::new(DEFAULT_CAPACITY))
}

/// Loopback holding up to `capacity` event lists. Zero is `InvalidConfig`.
pub fn ump_channel_with_capacity(capacity: usize) -> Result<(UmpProducer, UmpConsumer)> {
    if capacity == 0 {
        return Err(Error::InvalidConfig(
            "loopback channel needs room for at least one event list".into(),
        ));
    }
    Ok(split(HeapRb::new(capacity)))
}

fn split(rb: HeapRb<UmpEventList>) -> (UmpProducer, UmpConsumer) {
    let (producer, consumer) = rb.split();
    (UmpProducer { producer }, UmpConsumer { consumer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_list::Protocol;

    fn note_list(word: u32) -> UmpEventList {
        let mut list = UmpEventList::new(Protocol::Midi1);
        list.add(0, &[word]).unwrap();
        list
    }

    #[test]
    fn test_channel_push_and_drain() {
        let (mut producer, mut consumer) = ump_channel();

        producer.send(note_list(0x2090_3C64)).unwrap();
        producer.send(note_list(0x2080_3C00)).unwrap();
        assert_eq!(consumer.pending_count(), 2);

        let lists = consumer.drain_all();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].words(), vec![0x2090_3C64]);
        assert_eq!(lists[1].words(), vec![0x2080_3C00]);
        assert!(!consumer.has_pending());
    }

    #[test]
    fn test_capacity_overflow() {
        let (mut producer, _consumer) = ump_channel_with_capacity(2).unwrap();

        producer.send(note_list(0x2090_3C64)).unwrap();
        producer.send(note_list(0x2090_3C64)).unwrap();
        assert!(producer.is_full());

        assert!(matches!(
            producer.send(note_list(0x2090_3C64)),
            Err(Error::TransportFull)
        ));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            ump_channel_with_capacity(0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_pop_in_send_order() {
        let (mut producer, mut consumer) = ump_channel_with_capacity(1).unwrap();
        producer.send(note_list(0x2090_3C64)).unwrap();
        assert_eq!(consumer.pop().map(|l| l.words()), Some(vec![0x2090_3C64]));
        assert!(consumer.pop().is_none());
    }

    #[test]
    fn test_vec_transport_records() {
        let mut sent: Vec<UmpEventList> = Vec::new();
        sent.send(note_list(0x2090_3C64)).unwrap();
        assert_eq!(sent.len(), 1);
    }
}
