//! The 64-bit UMP SysEx packet and its status nibble.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{MAX_PACKET_PAYLOAD, SYSEX7_MESSAGE_TYPE};
use crate::error::{ConversionError, Result};
use crate::ump::{check_group, group_nibble, message_type_nibble};

/// Payload bytes of a single packet. Never spills to the heap.
pub type PacketPayload = SmallVec<[u8; MAX_PACKET_PAYLOAD]>;

/// Segmentation marker in bits 23-20 of word 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SysExStatus {
    /// Whole message fits in one packet.
    Complete,
    Start,
    Continue,
    End,
}

impl SysExStatus {
    /// Value of the status field, 0-3.
    #[inline]
    pub fn nibble(self) -> u8 {
        match self {
            SysExStatus::Complete => 0,
            SysExStatus::Start => 1,
            SysExStatus::Continue => 2,
            SysExStatus::End => 3,
        }
    }

    /// Parses the status field. Values above 3 are `InvalidStatus`.
    #[inline]
    pub fn from_nibble(nibble: u8) -> Result<Self> {
        match nibble {
            0 => Ok(SysExStatus::Complete),
            1 => Ok(SysExStatus::Start),
            2 => Ok(SysExStatus::Continue),
            3 => Ok(SysExStatus::End),
            n => Err(ConversionError::InvalidStatus(n)),
        }
    }

    /// Status of a packet given whether it is the first of its run and how many
    /// bytes remained before it was filled.
    #[inline]
    pub fn for_position(is_first: bool, remaining: usize) -> Self {
        let fits = remaining <= MAX_PACKET_PAYLOAD;
        match (is_first, fits) {
            (true, true) => SysExStatus::Complete,
            (true, false) => SysExStatus::Start,
            (false, true) => SysExStatus::End,
            (false, false) => SysExStatus::Continue,
        }
    }
}

/// UMP SysEx-in-64-bits packet (message type 0x3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UmpSysExPacket {
    pub word0: u32,
    pub word1: u32,
}

impl UmpSysExPacket {
    /// Wraps two raw words without validating them; see [`payload`](Self::payload).
    #[inline]
    pub fn from_words(word0: u32, word1: u32) -> Self {
        Self { word0, word1 }
    }

    /// Packs up to six payload bytes on `group`.
    ///
    /// A longer payload fails with `InvalidByteCount`, a group above 15 with
    /// `InvalidGroup`.
    pub fn new(group: u8, status: SysExStatus, payload: &[u8]) -> Result<Self> {
        let group = check_group(group)?;
        if payload.len() > MAX_PACKET_PAYLOAD {
            return Err(ConversionError::InvalidByteCount(
                u8::try_from(payload.len()).unwrap_or(u8::MAX),
            ));
        }
        Ok(Self::pack(group, status, payload))
    }

    /// `payload.len() <= 6` and `group <= 15` are the caller's to uphold.
    pub(crate) fn pack(group: u8, status: SysExStatus, payload: &[u8]) -> Self {
        let count = payload.len().min(MAX_PACKET_PAYLOAD);
        let mut bytes = [0u8; MAX_PACKET_PAYLOAD];
        bytes[..count].copy_from_slice(&payload[..count]);

        let header = (SYSEX7_MESSAGE_TYPE as u32) << 28
            | ((group & 0x0F) as u32) << 24
            | (status.nibble() as u32) << 20
            | (count as u32) << 16;
        let word0 = header | u16::from_be_bytes([bytes[0], bytes[1]]) as u32;
        let word1 = u32::from_be_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]);
        Self { word0, word1 }
    }

    /// `[word0, word1]`, in transmission order.
    #[inline]
    pub fn words(&self) -> [u32; 2] {
        [self.word0, self.word1]
    }

    #[inline]
    pub fn message_type(&self) -> u8 {
        message_type_nibble(self.word0)
    }

    #[inline]
    pub fn group(&self) -> u8 {
        group_nibble(self.word0)
    }

    #[inline]
    pub fn status_nibble(&self) -> u8 {
        (self.word0 >> 20) as u8 & 0x0F
    }

    #[inline]
    pub fn status(&self) -> Result<SysExStatus> {
        SysExStatus::from_nibble(self.status_nibble())
    }

    /// Raw byte-count field. Not clamped; may exceed 6 on malformed input.
    #[inline]
    pub fn byte_count(&self) -> u8 {
        (self.word0 >> 16) as u8 & 0x0F
    }

    /// All six payload slots, padding included.
    #[inline]
    pub fn raw_payload(&self) -> [u8; MAX_PACKET_PAYLOAD] {
        let [_, _, b0, b1] = self.word0.to_be_bytes();
        let [b2, b3, b4, b5] = self.word1.to_be_bytes();
        [b0, b1, b2, b3, b4, b5]
    }

    /// Valid payload bytes, after checking message type and byte count.
    pub fn payload(&self) -> Result<PacketPayload> {
        let mt = self.message_type();
        if mt != SYSEX7_MESSAGE_TYPE {
            return Err(ConversionError::UnsupportedMessageType(mt));
        }
        let count = self.byte_count();
        if count as usize > MAX_PACKET_PAYLOAD {
            return Err(ConversionError::InvalidByteCount(count));
        }
        let raw = self.raw_payload();
        Ok(PacketPayload::from_slice(&raw[..count as usize]))
    }
}

impl From<[u32; 2]> for UmpSysExPacket {
    fn from(words: [u32; 2]) -> Self {
        Self::from_words(words[0], words[1])
    }
}

impl From<UmpSysExPacket> for [u32; 2] {
    fn from(packet: UmpSysExPacket) -> Self {
        packet.words()
    }
}
