//! MIDI 1.0 Protocol channel voice messages in 32-bit UMP packets (message type 0x2).
//!
//! Layout: `[MT=2][Group][Status byte][Data1][Data2]`. A two-byte message
//! (program change, channel pressure) leaves the last byte zero.

use crate::error::{ConversionError, Result};
use crate::event::{channel_voice_len, MidiEvent};
use crate::ump::{check_group, group_nibble, message_type_nibble};

/// UMP message type of a MIDI 1.0 channel voice packet.
pub const MIDI1_CHANNEL_VOICE_MESSAGE_TYPE: u8 = 0x2;

/// Builds a type-0x2 word from a raw status byte and two data bytes.
#[inline]
pub fn channel_voice_word(group: u8, status: u8, data1: u8, data2: u8) -> u32 {
    (MIDI1_CHANNEL_VOICE_MESSAGE_TYPE as u32) << 28
        | ((group & 0x0F) as u32) << 24
        | (status as u32) << 16
        | ((data1 & 0x7F) as u32) << 8
        | (data2 & 0x7F) as u32
}

/// MIDI 1.0 Protocol Note On packet.
#[inline]
pub fn note_on_word(group: u8, channel: u8, note: u8, velocity: u8) -> u32 {
    channel_voice_word(group, 0x90 | (channel & 0x0F), note, velocity)
}

#[inline]
pub fn note_off_word(group: u8, channel: u8, note: u8, velocity: u8) -> u32 {
    channel_voice_word(group, 0x80 | (channel & 0x0F), note, velocity)
}

/// Wraps a channel voice event in a type-0x2 packet.
pub fn event_to_word(group: u8, event: &MidiEvent) -> Result<u32> {
    let group = check_group(group)?;
    let bytes = event.to_bytes();
    bytes_to_word(group, &bytes)
}

/// Wraps a 2- or 3-byte MIDI 1.0 channel voice message in a type-0x2 packet.
pub fn bytes_to_word(group: u8, bytes: &[u8]) -> Result<u32> {
    let group = check_group(group)?;
    let status = *bytes
        .first()
        .ok_or_else(|| ConversionError::MidiParse("empty channel voice message".into()))?;
    let len = channel_voice_len(status).ok_or_else(|| {
        ConversionError::MidiParse(format!("not a channel voice status: {:#04x}", status))
    })?;
    if bytes.len() < len {
        return Err(ConversionError::MidiParse(format!(
            "channel voice message needs {} bytes, got {}",
            len,
            bytes.len()
        )));
    }
    let data2 = if len == 3 { bytes[2] } else { 0 };
    Ok(channel_voice_word(group, status, bytes[1], data2))
}

/// MIDI 1.0 bytes carried by a type-0x2 word: 2 or 3 bytes depending on status.
pub fn word_to_bytes(word: u32) -> Result<Vec<u8>> {
    let mt = message_type_nibble(word);
    if mt != MIDI1_CHANNEL_VOICE_MESSAGE_TYPE {
        return Err(ConversionError::UnsupportedMessageType(mt));
    }
    let [_, status, data1, data2] = word.to_be_bytes();
    let len = channel_voice_len(status).ok_or_else(|| {
        ConversionError::MidiParse(format!("not a channel voice status: {:#04x}", status))
    })?;
    let mut bytes = vec![status, data1, data2];
    bytes.truncate(len);
    Ok(bytes)
}

/// Decodes a type-0x2 word into an event. Returns the group alongside.
pub fn word_to_event(timestamp: u64, word: u32) -> Result<(u8, MidiEvent)> {
    let bytes = word_to_bytes(word)?;
    let event = MidiEvent::from_bytes(timestamp, &bytes)?;
    Ok((group_nibble(word), event))
}
