//! UMP message types and word-level field extraction.
//!
//! Every Universal MIDI Packet starts with a 4-bit message type in the top
//! nibble of its first word. The type alone determines how many 32-bit words
//! the packet occupies, which is what lets a flat word stream be split back
//! into packets.

use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, Result};

/// Highest valid UMP group.
pub const MAX_GROUP: u8 = 0x0F;

/// UMP message type (top nibble of word 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Utility,
    SystemRealTimeCommon,
    /// MIDI 1.0 channel voice inside a 32-bit packet.
    Midi1ChannelVoice,
    /// 7-bit SysEx payload in a 64-bit packet.
    SysEx7,
    Midi2ChannelVoice,
    /// 8-bit data (SysEx8 and mixed data set) in a 128-bit packet.
    Data128,
    /// Types 0x6-0xF are reserved or newer stream messages; sizes are still fixed.
    Other(u8),
}

impl MessageType {
    #[inline]
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x0 => MessageType::Utility,
            0x1 => MessageType::SystemRealTimeCommon,
            0x2 => MessageType::Midi1ChannelVoice,
            0x3 => MessageType::SysEx7,
            0x4 => MessageType::Midi2ChannelVoice,
            0x5 => MessageType::Data128,
            n => MessageType::Other(n),
        }
    }

    /// Message type of a packet whose first word is `word0`.
    #[inline]
    pub fn of_word(word0: u32) -> Self {
        Self::from_nibble(message_type_nibble(word0))
    }

    #[inline]
    pub fn nibble(self) -> u8 {
        match self {
            MessageType::Utility => 0x0,
            MessageType::SystemRealTimeCommon => 0x1,
            MessageType::Midi1ChannelVoice => 0x2,
            MessageType::SysEx7 => 0x3,
            MessageType::Midi2ChannelVoice => 0x4,
            MessageType::Data128 => 0x5,
            MessageType::Other(n) => n & 0x0F,
        }
    }

    /// Packet size in 32-bit words.
    #[inline]
    pub fn word_count(self) -> usize {
        match self.nibble() {
            0x0 | 0x1 | 0x2 | 0x6 | 0x7 => 1,
            0x3 | 0x4 | 0x8 | 0x9 | 0xA => 2,
            0xB | 0xC => 3,
            _ => 4,
        }
    }
}

#[inline]
pub fn message_type_nibble(word0: u32) -> u8 {
    (word0 >> 28) as u8 & 0x0F
}

#[inline]
pub fn group_nibble(word0: u32) -> u8 {
    (word0 >> 24) as u8 & 0x0F
}

/// Validates a group number.
#[inline]
pub fn check_group(group: u8) -> Result<u8> {
    if group > MAX_GROUP {
        return Err(ConversionError::InvalidGroup(group));
    }
    Ok(group)
}

/// Splits a flat word stream into UMP packets using the message-type size table.
///
/// Yields `Err(TruncatedPacket)` once if the final packet is cut short, then stops.
pub fn split_packets(words: &[u32]) -> PacketSplit<'_> {
    PacketSplit { rest: words }
}

pub struct PacketSplit<'a> {
    rest: &'a [u32],
}

impl<'a> Iterator for PacketSplit<'a> {
    type Item = Result<&'a [u32]>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = *self.rest.first()?;
        let size = MessageType::of_word(first).word_count();
        if self.rest.len() < size {
            let words = self.rest.len();
            self.rest = &[];
            return Some(Err(ConversionError::TruncatedPacket { words }));
        }
        let (packet, rest) = self.rest.split_at(size);
        self.rest = rest;
        Some(Ok(packet))
    }
}
