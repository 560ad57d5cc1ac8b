//! Legacy MIDI 1.0 byte-stream delivery.

/// Bytes delivered together, with the transport's timestamp.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MidiPacket {
    pub timestamp: u64,
    pub bytes: Vec<u8>,
}

/// Ordered legacy deliveries. Messages, SysEx included, may span packets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MidiPacketList {
    packets: Vec<MidiPacket>,
}

impl MidiPacketList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a copy of `bytes` stamped `timestamp`.
    pub fn add(&mut self, timestamp: u64, bytes: &[u8]) -> &mut Self {
        self.packets.push(MidiPacket {
            timestamp,
            bytes: bytes.to_vec(),
        });
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MidiPacket> {
        self.packets.iter()
    }
}

impl FromIterator<MidiPacket> for MidiPacketList {
    fn from_iter<I: IntoIterator<Item = MidiPacket>>(iter: I) -> Self {
        Self {
            packets: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MidiPacketList {
    type Item = &'a MidiPacket;
    type IntoIter = std::slice::Iter<'a, MidiPacket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
