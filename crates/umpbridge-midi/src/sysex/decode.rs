//! UMP SysEx-in-64-bits packets -> MIDI 1.0 SysEx bytes.

use super::packet::{SysExStatus, UmpSysExPacket};
use crate::error::{ConversionError, Result, RunViolation};
use crate::ump::split_packets;

/// Reassembles SysEx messages from packets that may arrive across several
/// transport deliveries.
///
/// Holds at most one open run. Any error discards that run, so the next
/// packet is judged on its own.
#[derive(Clone, Debug, Default)]
pub struct SysExAssembler {
    buffer: Vec<u8>,
    open: bool,
    index: usize,
}

impl SysExAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the message buffer so a run of up to `capacity` bytes does not reallocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            open: false,
            index: 0,
        }
    }

    /// True while a `Start` has been seen without its `End`.
    #[inline]
    pub fn in_progress(&self) -> bool {
        self.open
    }

    /// Packets accepted so far, counting from construction or the last `reset`.
    #[inline]
    pub fn packets_seen(&self) -> usize {
        self.index
    }

    /// Drops any open run and restarts packet numbering.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.open = false;
        self.index = 0;
    }

    /// Feeds one packet. Returns the finished message when the packet closes a run.
    pub fn push(&mut self, packet: UmpSysExPacket) -> Result<Option<Vec<u8>>> {
        let index = self.index;
        self.index += 1;
        let result = self.accept(index, packet);
        if result.is_err() {
            self.buffer.clear();
            self.open = false;
        }
        result
    }

    fn accept(&mut self, index: usize, packet: UmpSysExPacket) -> Result<Option<Vec<u8>>> {
        let payload = packet.payload()?;
        let status = packet.status()?;
        let malformed = |reason| ConversionError::MalformedRun {
            index,
            status,
            reason,
        };

        match (status, self.open) {
            (SysExStatus::Complete, false) => Ok(Some(payload.to_vec())),
            (SysExStatus::Start, false) => {
                self.buffer.clear();
                self.buffer.extend_from_slice(&payload);
                self.open = true;
                Ok(None)
            }
            (SysExStatus::Continue, true) => {
                self.buffer.extend_from_slice(&payload);
                Ok(None)
            }
            (SysExStatus::End, true) => {
                self.buffer.extend_from_slice(&payload);
                self.open = false;
                Ok(Some(std::mem::take(&mut self.buffer)))
            }
            (SysExStatus::Complete | SysExStatus::Start, true) => {
                Err(malformed(RunViolation::Interrupted))
            }
            (SysExStatus::Continue | SysExStatus::End, false) => {
                Err(malformed(RunViolation::NotStarted))
            }
        }
    }

    /// Errors if a run is still open. Call once the input is known to be complete.
    pub fn finish(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.buffer.clear();
        self.open = false;
        Err(ConversionError::MalformedRun {
            index: self.index,
            status: SysExStatus::End,
            reason: RunViolation::Unterminated,
        })
    }
}

/// Decodes one or more complete runs, concatenating their payloads in arrival order.
#[derive(Clone, Copy, Debug, Default)]
pub struct UmpPacketDecoder;

impl UmpPacketDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Bytes of every run in `packets`. A run left open at the end is `Unterminated`.
    pub fn decode<I>(&self, packets: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = UmpSysExPacket>,
    {
        let mut assembler = SysExAssembler::new();
        let mut out = Vec::new();
        for packet in packets {
            if let Some(message) = assembler.push(packet)? {
                out.extend_from_slice(&message);
            }
        }
        assembler.finish()?;
        Ok(out)
    }

    /// Like [`decode`](Self::decode), over a flat word stream of SysEx7 packets.
    pub fn decode_words(&self, words: &[u32]) -> Result<Vec<u8>> {
        let packets = split_packets(words)
            .map(|p| p.map(|w| UmpSysExPacket::from_words(w[0], w.get(1).copied().unwrap_or(0))))
            .collect::<Result<Vec<_>>>()?;
        self.decode(packets)
    }
}

/// Decodes `packets` with a fresh decoder.
pub fn decode(packets: &[UmpSysExPacket]) -> Result<Vec<u8>> {
    UmpPacketDecoder::new().decode(packets.iter().copied())
}
