//! Incoming path: both delivery records decode to [`Received`] messages.
//!
//! - [`SysExReceiver::on_event_list`] takes UMP event lists
//! - [`SysExReceiver::on_packet_list`] takes legacy MIDI 1.0 byte packets
//!
//! Legacy SysEx is gathered up to its `0xF7`, segmented, and pushed through
//! a [`SysExAssembler`] just like native UMP packets, so both paths share
//! validation. Legacy channel voice messages may use running status.
//! Malformed input is logged and dropped; the stream keeps going.

use tracing::{debug, trace, warn};
use umpbridge_midi::sysex::{SYSEX_END, SYSEX_START};
use umpbridge_midi::{
    channel_voice_len, midi1, ConversionError, HexBytes, MessageType, MidiEvent, SysExAssembler,
    SysExSegmenter, UmpSysExPacket,
};

use crate::event_list::{EventPacket, UmpEventList};
use crate::packet_list::MidiPacketList;

/// A decoded message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Received {
    /// SysEx payload without `0xF0`/`0xF7`.
    SysEx { timestamp: u64, bytes: Vec<u8> },
    ChannelVoice(MidiEvent),
}

/// Receive-side state for both delivery paths.
///
/// Each path has its own assembler, so a legacy SysEx completing while a
/// UMP run is still open does not disturb that run.
#[derive(Debug, Default)]
pub struct SysExReceiver {
    ump_assembler: SysExAssembler,
    legacy_assembler: SysExAssembler,
    segmenter: SysExSegmenter,
    legacy_sysex: Option<Vec<u8>>,
    running_status: Option<u8>,
    dropped: usize,
}

#[derive(Clone, Copy, Debug)]
enum Path {
    Ump,
    Legacy,
}

impl SysExReceiver {
    /// Receiver with no message in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages discarded as malformed since construction.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// True while a SysEx message is partially received on either path.
    #[inline]
    pub fn in_progress(&self) -> bool {
        self.ump_assembler.in_progress()
            || self.legacy_assembler.in_progress()
            || self.legacy_sysex.is_some()
    }

    /// Decodes one UMP delivery. SysEx runs may span several lists.
    pub fn on_event_list(&mut self, list: &UmpEventList) -> Vec<Received> {
        let mut out = Vec::new();
        for packet in list {
            self.on_event_packet(packet, &mut out);
        }
        out
    }

    fn on_event_packet(&mut self, packet: &EventPacket, out: &mut Vec<Received>) {
        match packet.message_type() {
            Some(MessageType::SysEx7) => match packet.as_sysex() {
                Some(sysex) => self.push_sysex(Path::Ump, packet.timestamp, sysex, out),
                None => self.drop_message(ConversionError::TruncatedPacket {
                    words: packet.words.len(),
                }),
            },
            Some(MessageType::Midi1ChannelVoice) => {
                match midi1::word_to_event(packet.timestamp, packet.words[0]) {
                    Ok((_group, event)) => {
                        debug!("Received channel voice: {}", HexBytes(&event.to_bytes()));
                        out.push(Received::ChannelVoice(event));
                    }
                    Err(e) => self.drop_message(e),
                }
            }
            other => trace!("Skipping UMP packet of type {:?}", other),
        }
    }

    /// Decodes one legacy MIDI 1.0 delivery.
    ///
    /// SysEx and running status both carry over from one packet to the next.
    pub fn on_packet_list(&mut self, list: &MidiPacketList) -> Vec<Received> {
        let mut out = Vec::new();
        for packet in list {
            self.on_legacy_bytes(packet.timestamp, &packet.bytes, &mut out);
        }
        out
    }

    fn on_legacy_bytes(&mut self, timestamp: u64, bytes: &[u8], out: &mut Vec<Received>) {
        let mut i = 0;
        while i < bytes.len() {
            let byte = bytes[i];

            // Real-time bytes may appear anywhere, even inside SysEx
            if byte >= 0xF8 {
                trace!("Skipping real-time byte {:#04x}", byte);
                i += 1;
                continue;
            }

            if let Some(body) = self.legacy_sysex.as_mut() {
                if byte == SYSEX_END {
                    let body = std::mem::take(body);
                    self.legacy_sysex = None;
                    self.finish_legacy_sysex(timestamp, &body, out);
                    i += 1;
                } else if byte & 0x80 != 0 {
                    // Any other status byte cuts the message short; reprocess it below
                    self.legacy_sysex = None;
                    self.drop_message(ConversionError::MidiParse(format!(
                        "SysEx interrupted by status {:#04x}",
                        byte
                    )));
                } else {
                    body.push(byte);
                    i += 1;
                }
                continue;
            }

            if byte == SYSEX_START {
                self.running_status = None;
                self.legacy_sysex = Some(Vec::new());
                i += 1;
                continue;
            }

            // A data byte here reuses the last channel voice status
            let (status, data_start) = if byte & 0x80 != 0 {
                self.running_status = channel_voice_len(byte).map(|_| byte);
                (byte, i + 1)
            } else if let Some(status) = self.running_status {
                (status, i)
            } else {
                trace!("Skipping data byte {:#04x} without running status", byte);
                i += 1;
                continue;
            };

            let Some(len) = channel_voice_len(status) else {
                trace!("Skipping system common byte {:#04x}", byte);
                i += 1;
                continue;
            };
            let data_end = data_start + len - 1;
            if data_end > bytes.len() {
                self.drop_message(ConversionError::MidiParse(format!(
                    "channel voice message cut short: {:02x} {}",
                    status,
                    HexBytes(&bytes[data_start..])
                )));
                break;
            }
            let data = &bytes[data_start..data_end];
            if let Some(pos) = data.iter().position(|b| b & 0x80 != 0) {
                self.drop_message(ConversionError::MidiParse(format!(
                    "channel voice message interrupted by status {:#04x}",
                    data[pos]
                )));
                i = data_start + pos;
                continue;
            }

            let mut message = [status, 0, 0];
            message[1..len].copy_from_slice(data);
            match MidiEvent::from_bytes(timestamp, &message[..len]) {
                Ok(event) => {
                    debug!("Received channel voice: {}", HexBytes(&message[..len]));
                    out.push(Received::ChannelVoice(event));
                }
                Err(e) => self.drop_message(e),
            }
            i = data_end;
        }
    }

    fn finish_legacy_sysex(&mut self, timestamp: u64, body: &[u8], out: &mut Vec<Received>) {
        let segments = match self.segmenter.packets(body) {
            Ok(segments) => segments,
            Err(e) => return self.drop_message(e),
        };
        for packet in segments {
            self.push_sysex(Path::Legacy, timestamp, packet, out);
        }
    }

    fn push_sysex(
        &mut self,
        path: Path,
        timestamp: u64,
        packet: UmpSysExPacket,
        out: &mut Vec<Received>,
    ) {
        let assembler = match path {
            Path::Ump => &mut self.ump_assembler,
            Path::Legacy => &mut self.legacy_assembler,
        };
        match assembler.push(packet) {
            Ok(Some(bytes)) => {
                debug!("Received SysEx ({:?}): {}", path, HexBytes(&bytes));
                out.push(Received::SysEx { timestamp, bytes });
            }
            Ok(None) => {}
            Err(e) => self.drop_message(e),
        }
    }

    fn drop_message(&mut self, error: ConversionError) {
        self.dropped += 1;
        warn!("Dropping malformed MIDI input: {}", error);
    }
}
