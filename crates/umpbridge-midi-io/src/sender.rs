//! Outgoing path: bytes and events into event lists, handed to a transport.

use tracing::debug;
use umpbridge_midi::{midi1, HexBytes, HexWords, MidiEvent, SysExSegmenter};

use crate::error::Result;
use crate::event_list::{Protocol, UmpEventList, DEFAULT_EVENT_LIST_CAPACITY};
use crate::transport::PacketTransport;

/// Turns outgoing SysEx and channel voice messages into event lists.
#[derive(Clone, Copy, Debug)]
pub struct SysExSender {
    segmenter: SysExSegmenter,
    capacity: usize,
}

impl Default for SysExSender {
    fn default() -> Self {
        Self {
            segmenter: SysExSegmenter::new(),
            capacity: DEFAULT_EVENT_LIST_CAPACITY,
        }
    }
}

impl SysExSender {
    /// `capacity` is the word capacity of each event list built.
    pub fn new(segmenter: SysExSegmenter, capacity: usize) -> Self {
        Self {
            segmenter,
            capacity,
        }
    }

    /// Group stamped on everything this sender builds.
    #[inline]
    pub fn group(&self) -> u8 {
        self.segmenter.group()
    }

    /// MIDI 2.0 event list carrying `bytes` as SysEx7 packets.
    pub fn sysex_event_list(&self, timestamp: u64, bytes: &[u8]) -> Result<UmpEventList> {
        let words = self.segmenter.segment_words(bytes)?;
        let mut list = UmpEventList::with_capacity(Protocol::Midi2, self.capacity);
        list.add(timestamp, &words)?;
        Ok(list)
    }

    /// Returns the number of packets sent.
    pub fn send_sysex<T>(&self, transport: &mut T, timestamp: u64, bytes: &[u8]) -> Result<usize>
    where
        T: PacketTransport + ?Sized,
    {
        let list = self.sysex_event_list(timestamp, bytes)?;
        let packets = list.len();
        debug!(
            "Sending SysEx ({} bytes, {} packets): {} -> {}",
            bytes.len(),
            packets,
            HexBytes(bytes),
            HexWords(&list.words())
        );
        transport.send(list)?;
        Ok(packets)
    }

    /// MIDI 1.0 Protocol event list with a single channel voice word.
    pub fn event_list(&self, event: &MidiEvent) -> Result<UmpEventList> {
        let word = midi1::event_to_word(self.group(), event)?;
        let mut list = UmpEventList::with_capacity(Protocol::Midi1, self.capacity);
        list.add(event.timestamp, &[word])?;
        Ok(list)
    }

    /// Sends `event` as one MIDI 1.0 Protocol word.
    pub fn send_event<T>(&self, transport: &mut T, event: &MidiEvent) -> Result<()>
    where
        T: PacketTransport + ?Sized,
    {
        let list = self.event_list(event)?;
        debug!("Sending channel voice: {}", HexWords(&list.words()));
        transport.send(list)
    }

    pub fn send_note_on<T>(
        &self,
        transport: &mut T,
        timestamp: u64,
        channel: u8,
        note: u8,
        velocity: u8,
    ) -> Result<()>
    where
        T: PacketTransport + ?Sized,
    {
        self.send_event(
            transport,
            &MidiEvent::note_on(timestamp, channel, note, velocity),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use umpbridge_midi::ConversionError;

    #[test]
    fn test_sysex_event_list_protocol() {
        let sender = SysExSender::default();
        let list = sender
            .sysex_event_list(0, &[0x52, 0x00, 0x5F, 0x50])
            .unwrap();
        assert_eq!(list.protocol(), Protocol::Midi2);
        assert_eq!(list.words(), vec![0x3004_5200, 0x5F50_0000]);
    }

    #[test]
    fn test_send_sysex_counts_packets() {
        let mut sent: Vec<UmpEventList> = Vec::new();
        let sender = SysExSender::default();
        let packets = sender.send_sysex(&mut sent, 5, &[1u8; 13]).unwrap();
        assert_eq!(packets, 3);
        assert_eq!(sent.len(), 1);
        assert!(sent[0].iter().all(|p| p.timestamp == 5));
    }

    #[test]
    fn test_send_empty_sysex_fails() {
        let mut sent: Vec<UmpEventList> = Vec::new();
        let err = SysExSender::default()
            .send_sysex(&mut sent, 0, &[])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Conversion(ConversionError::EmptyPayload)
        ));
        assert!(sent.is_empty());
    }

    #[test]
    fn test_sysex_larger_than_list() {
        let sender = SysExSender::new(SysExSegmenter::new(), 4);
        let err = sender.sysex_event_list(0, &[0u8; 13]).unwrap_err();
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                needed: 6,
                capacity: 4
            }
        ));
    }

    #[test]
    fn test_send_note_on_uses_group() {
        let mut sent: Vec<UmpEventList> = Vec::new();
        let sender = SysExSender::new(SysExSegmenter::with_group(2).unwrap(), 16);
        sender.send_note_on(&mut sent, 0, 1, 60, 100).unwrap();
        assert_eq!(sent[0].protocol(), Protocol::Midi1);
        assert_eq!(sent[0].words(), vec![0x2291_3C64]);
    }
}
