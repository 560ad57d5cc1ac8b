//! Batched UMP delivery: an ordered list of timestamped packets.
//!
//! Mirrors the event-list record a platform MIDI service hands to send and
//! receive callbacks. Each packet holds the 1-4 words its message type calls for.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use umpbridge_midi::{split_packets, MessageType, UmpSysExPacket};

use crate::error::{Error, Result};

/// Word capacity of a list unless configured otherwise.
pub const DEFAULT_EVENT_LIST_CAPACITY: usize = 1024;

/// Protocol a list was built for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Protocol {
    #[default]
    Midi1,
    Midi2,
}

/// One UMP packet: 1-4 words sharing a timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPacket {
    pub timestamp: u64,
    pub words: SmallVec<[u32; 4]>,
}

impl EventPacket {
    /// Type of the first word; `None` for an empty packet.
    #[inline]
    pub fn message_type(&self) -> Option<MessageType> {
        self.words.first().map(|w| MessageType::of_word(*w))
    }

    /// The packet as a SysEx7 packet, if it is one.
    #[inline]
    pub fn as_sysex(&self) -> Option<UmpSysExPacket> {
        match (self.message_type(), self.words.as_slice()) {
            (Some(MessageType::SysEx7), [w0, w1]) => Some(UmpSysExPacket::from_words(*w0, *w1)),
            _ => None,
        }
    }
}

/// Word-capacity-bounded list of timestamped UMP packets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UmpEventList {
    protocol: Protocol,
    capacity: usize,
    word_count: usize,
    packets: Vec<EventPacket>,
}

impl UmpEventList {
    /// Empty list holding up to [`DEFAULT_EVENT_LIST_CAPACITY`] words.
    pub fn new(protocol: Protocol) -> Self {
        Self::with_capacity(protocol, DEFAULT_EVENT_LIST_CAPACITY)
    }

    /// `capacity` is in words, across all packets.
    pub fn with_capacity(protocol: Protocol, capacity: usize) -> Self {
        Self {
            protocol,
            capacity,
            word_count: 0,
            packets: Vec::new(),
        }
    }

    /// Appends `words`, split into packets by message type, all stamped `timestamp`.
    ///
    /// Either every packet is added or none is. Returns the number added.
    pub fn add(&mut self, timestamp: u64, words: &[u32]) -> Result<usize> {
        let needed = self.word_count + words.len();
        if needed > self.capacity {
            return Err(Error::CapacityExceeded {
                needed,
                capacity: self.capacity,
            });
        }
        let split = split_packets(words)
            .map(|p| {
                p.map(|w| EventPacket {
                    timestamp,
                    words: SmallVec::from_slice(w),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let added = split.len();
        self.packets.extend(split);
        self.word_count = needed;
        Ok(added)
    }

    /// Appends a SysEx7 run, all packets stamped `timestamp`.
    pub fn add_sysex(&mut self, timestamp: u64, packets: &[UmpSysExPacket]) -> Result<usize> {
        let words: Vec<u32> = packets.iter().flat_map(|p| p.words()).collect();
        self.add(timestamp, &words)
    }

    #[inline]
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventPacket> {
        self.packets.iter()
    }

    /// SysEx7 packets in order, skipping everything else.
    pub fn sysex_packets(&self) -> impl Iterator<Item = UmpSysExPacket> + '_ {
        self.packets.iter().filter_map(EventPacket::as_sysex)
    }

    /// All words, flattened in packet order.
    pub fn words(&self) -> Vec<u32> {
        let mut words = Vec::with_capacity(self.word_count);
        for packet in &self.packets {
            words.extend_from_slice(&packet.words);
        }
        words
    }
}

impl<'a> IntoIterator for &'a UmpEventList {
    type Item = &'a EventPacket;
    type IntoIter = std::slice::Iter<'a, EventPacket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umpbridge_midi::{segment, ConversionError};

    #[test]
    fn test_add_splits_by_message_type() {
        let mut list = UmpEventList::new(Protocol::Midi2);
        let added = list
            .add(7, &[0x2090_3C64, 0x3004_7E00, 0x0601_0000])
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(list.len(), 2);
        assert_eq!(list.word_count(), 3);
        assert!(list.iter().all(|p| p.timestamp == 7));
        assert_eq!(list.sysex_packets().count(), 1);
    }

    #[test]
    fn test_add_sysex_run() {
        let packets = segment(&[0u8; 20]).unwrap();
        let mut list = UmpEventList::new(Protocol::Midi2);
        list.add_sysex(0, &packets).unwrap();
        let back: Vec<_> = list.sysex_packets().collect();
        assert_eq!(back, packets);
        assert_eq!(list.words().len(), 8);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut list = UmpEventList::with_capacity(Protocol::Midi2, 3);
        list.add(0, &[0x3001_4100, 0]).unwrap();
        let err = list.add(0, &[0x3001_4200, 0]).unwrap_err();
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                needed: 4,
                capacity: 3
            }
        ));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_truncated_words_add_nothing() {
        let mut list = UmpEventList::new(Protocol::Midi2);
        let err = list.add(0, &[0x2090_3C64, 0x3004_7E00]).unwrap_err();
        assert!(matches!(
            err,
            Error::Conversion(ConversionError::TruncatedPacket { words: 1 })
        ));
        assert!(list.is_empty());
        assert_eq!(list.word_count(), 0);
    }

    #[test]
    fn test_as_sysex_ignores_other_types() {
        let packet = EventPacket {
            timestamp: 0,
            words: SmallVec::from_slice(&[0x4090_3C00, 0xFFFF_0000]),
        };
        assert_eq!(packet.message_type(), Some(MessageType::Midi2ChannelVoice));
        assert!(packet.as_sysex().is_none());
    }
}
