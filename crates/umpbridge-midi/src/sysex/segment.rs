//! MIDI 1.0 SysEx bytes -> UMP SysEx-in-64-bits packets.

use super::packet::{SysExStatus, UmpSysExPacket};
use super::{MAX_PACKET_PAYLOAD, SYSEX_END, SYSEX_START};
use crate::error::{ConversionError, Result};
use crate::ump::check_group;

/// Messages at or below this length keep their framing bytes.
///
/// `[F0, F7, 01]` is sent as a three-byte payload, framing included.
pub const FRAMING_STRIP_MIN_LEN: usize = 4;

/// Removes a leading `0xF0` and a trailing `0xF7`, each checked on its own.
///
/// Only applied when `bytes.len() >= FRAMING_STRIP_MIN_LEN`.
pub fn strip_framing(bytes: &[u8]) -> &[u8] {
    if bytes.len() < FRAMING_STRIP_MIN_LEN {
        return bytes;
    }
    let mut body = bytes;
    if let [SYSEX_START, rest @ ..] = body {
        body = rest;
    }
    if let [rest @ .., SYSEX_END] = body {
        body = rest;
    }
    body
}

/// Splits SysEx payloads into 64-bit UMP packets on a fixed group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SysExSegmenter {
    group: u8,
}

impl SysExSegmenter {
    /// Segmenter on group 0.
    #[inline]
    pub fn new() -> Self {
        Self { group: 0 }
    }

    /// Segmenter stamping `group` on every packet. Groups above 15 are `InvalidGroup`.
    pub fn with_group(group: u8) -> Result<Self> {
        Ok(Self {
            group: check_group(group)?,
        })
    }

    /// Group written into bits 27-24 of each word 0.
    #[inline]
    pub fn group(&self) -> u8 {
        self.group
    }

    /// Lazily yields the packets for `bytes` without allocating.
    pub fn packets<'a>(&self, bytes: &'a [u8]) -> Result<Segments<'a>> {
        if bytes.is_empty() {
            return Err(ConversionError::EmptyPayload);
        }
        Ok(Segments {
            remaining: strip_framing(bytes),
            group: self.group,
            emitted: 0,
        })
    }

    /// Packets for `bytes`, framing stripped, in transmission order.
    pub fn segment(&self, bytes: &[u8]) -> Result<Vec<UmpSysExPacket>> {
        let mut out = Vec::with_capacity(packet_count(bytes.len()));
        self.segment_into(bytes, &mut out)?;
        Ok(out)
    }

    /// Appends the packets for `bytes` to a caller-owned buffer.
    ///
    /// Returns the number of packets appended. Nothing is appended on error.
    pub fn segment_into(&self, bytes: &[u8], out: &mut Vec<UmpSysExPacket>) -> Result<usize> {
        let segments = self.packets(bytes)?;
        let before = out.len();
        out.extend(segments);
        Ok(out.len() - before)
    }

    /// Flat `[word0, word1, word0, word1, ...]` stream, as handed to an event list.
    pub fn segment_words(&self, bytes: &[u8]) -> Result<Vec<u32>> {
        let segments = self.packets(bytes)?;
        let mut words = Vec::with_capacity(2 * packet_count(bytes.len()));
        for packet in segments {
            words.extend_from_slice(&packet.words());
        }
        Ok(words)
    }
}

/// Segments `bytes` on group 0.
pub fn segment(bytes: &[u8]) -> Result<Vec<UmpSysExPacket>> {
    SysExSegmenter::new().segment(bytes)
}

/// Upper bound on the packets needed for `len` input bytes.
#[inline]
fn packet_count(len: usize) -> usize {
    len.div_ceil(MAX_PACKET_PAYLOAD)
}

/// Iterator returned by [`SysExSegmenter::packets`].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    remaining: &'a [u8],
    group: u8,
    emitted: usize,
}

impl Iterator for Segments<'_> {
    type Item = UmpSysExPacket;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        let status = SysExStatus::for_position(self.emitted == 0, self.remaining.len());
        let take = self.remaining.len().min(MAX_PACKET_PAYLOAD);
        let (chunk, rest) = self.remaining.split_at(take);
        self.remaining = rest;
        self.emitted += 1;
        Some(UmpSysExPacket::pack(self.group, status, chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = packet_count(self.remaining.len());
        (n, Some(n))
    }
}

impl ExactSizeIterator for Segments<'_> {}
