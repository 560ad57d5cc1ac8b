//! MIDI 1.0 channel voice events as carried by either transport path.

use midi_msg::{Channel, ChannelVoiceMsg, MidiMsg};

use crate::error::{ConversionError, Result};

/// Channel voice message with the transport timestamp it arrived with.
///
/// The timestamp is opaque here; the transport owns its meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiEvent {
    pub timestamp: u64,
    pub channel: Channel,
    pub msg: ChannelVoiceMsg,
}

impl MidiEvent {
    #[inline]
    pub fn new(timestamp: u64, channel: Channel, msg: ChannelVoiceMsg) -> Self {
        Self {
            timestamp,
            channel,
            msg,
        }
    }

    /// Note On. Data bytes are masked to 7 bits.
    #[inline]
    pub fn note_on(timestamp: u64, channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(
            timestamp,
            Channel::from_u8(channel),
            ChannelVoiceMsg::NoteOn {
                note: note & 0x7F,
                velocity: velocity & 0x7F,
            },
        )
    }

    /// Note Off.
    #[inline]
    pub fn note_off(timestamp: u64, channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(
            timestamp,
            Channel::from_u8(channel),
            ChannelVoiceMsg::NoteOff {
                note: note & 0x7F,
                velocity: velocity & 0x7F,
            },
        )
    }

    /// Control change with a raw controller number.
    #[inline]
    pub fn control_change(timestamp: u64, channel: u8, cc: u8, value: u8) -> Self {
        Self::new(
            timestamp,
            Channel::from_u8(channel),
            ChannelVoiceMsg::ControlChange {
                control: midi_msg::ControlChange::CC {
                    control: cc & 0x7F,
                    value: value & 0x7F,
                },
            },
        )
    }

    /// Program change (two bytes on the wire).
    #[inline]
    pub fn program_change(timestamp: u64, channel: u8, program: u8) -> Self {
        Self::new(
            timestamp,
            Channel::from_u8(channel),
            ChannelVoiceMsg::ProgramChange {
                program: program & 0x7F,
            },
        )
    }

    /// `bend`: unsigned 14-bit, center 8192.
    #[inline]
    pub fn pitch_bend(timestamp: u64, channel: u8, bend: u16) -> Self {
        Self::new(
            timestamp,
            Channel::from_u8(channel),
            ChannelVoiceMsg::PitchBend {
                bend: bend.min(0x3FFF),
            },
        )
    }

    /// Channel as 0-15.
    #[inline]
    pub fn channel_num(&self) -> u8 {
        self.channel as u8
    }

    #[inline]
    pub fn is_note_on(&self) -> bool {
        matches!(self.msg, ChannelVoiceMsg::NoteOn { velocity, .. } if velocity > 0)
    }

    /// Note Off, or Note On with velocity 0.
    #[inline]
    pub fn is_note_off(&self) -> bool {
        matches!(
            self.msg,
            ChannelVoiceMsg::NoteOff { .. } | ChannelVoiceMsg::NoteOn { velocity: 0, .. }
        )
    }

    #[inline]
    pub fn note(&self) -> Option<u8> {
        match self.msg {
            ChannelVoiceMsg::NoteOn { note, .. }
            | ChannelVoiceMsg::NoteOff { note, .. }
            | ChannelVoiceMsg::PolyPressure { note, .. } => Some(note),
            _ => None,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Option<u8> {
        match self.msg {
            ChannelVoiceMsg::NoteOn { velocity, .. }
            | ChannelVoiceMsg::NoteOff { velocity, .. } => Some(velocity),
            _ => None,
        }
    }

    #[inline]
    pub fn to_midi_msg(&self) -> MidiMsg {
        MidiMsg::ChannelVoice {
            channel: self.channel,
            msg: self.msg,
        }
    }

    /// MIDI 1.0 byte stream form (2 or 3 bytes).
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_midi_msg().to_midi()
    }

    /// Parses one channel voice message from MIDI 1.0 bytes.
    ///
    /// Channel mode messages (controllers 120-127) come back as the plain
    /// control change they were sent as.
    pub fn from_bytes(timestamp: u64, bytes: &[u8]) -> Result<Self> {
        let (msg, _len) = MidiMsg::from_midi(bytes)?;
        match msg {
            MidiMsg::ChannelVoice { channel, msg } => Ok(Self {
                timestamp,
                channel,
                msg,
            }),
            MidiMsg::ChannelMode { channel, .. } => match bytes {
                [_, control, value, ..] => Ok(Self {
                    timestamp,
                    channel,
                    msg: ChannelVoiceMsg::ControlChange {
                        control: midi_msg::ControlChange::CC {
                            control: control & 0x7F,
                            value: value & 0x7F,
                        },
                    },
                }),
                _ => Err(ConversionError::MidiParse(format!(
                    "channel mode message cut short: {:02x?}",
                    bytes
                ))),
            },
            other => Err(ConversionError::MidiParse(format!(
                "expected channel voice message, got {:?}",
                other
            ))),
        }
    }
}

/// Length of a channel voice message from its status byte, or `None` for
/// system and data bytes.
#[inline]
pub fn channel_voice_len(status: u8) -> Option<usize> {
    match status & 0xF0 {
        0x80 | 0x90 | 0xA0 | 0xB0 | 0xE0 => Some(3),
        0xC0 | 0xD0 => Some(2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on() {
        let event = MidiEvent::note_on(100, 0, 60, 100);
        assert!(event.is_note_on());
        assert!(!event.is_note_off());
        assert_eq!(event.note(), Some(60));
        assert_eq!(event.velocity(), Some(100));
        assert_eq!(event.channel_num(), 0);
        assert_eq!(event.timestamp, 100);
    }

    #[test]
    fn test_note_on_zero_velocity_is_note_off() {
        let event = MidiEvent::note_on(0, 0, 60, 0);
        assert!(event.is_note_off());
        assert!(!event.is_note_on());
    }

    #[test]
    fn test_data_bytes_masked() {
        let event = MidiEvent::note_on(0, 2, 0xFF, 0x80);
        assert_eq!(event.note(), Some(0x7F));
        assert_eq!(event.velocity(), Some(0));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let event = MidiEvent::note_on(0, 5, 60, 100);
        let bytes = event.to_bytes();
        assert_eq!(bytes, vec![0x95, 60, 100]);
        let parsed = MidiEvent::from_bytes(0, &bytes).unwrap();
        assert_eq!(parsed.channel, event.channel);
        assert_eq!(parsed.msg, event.msg);
    }

    #[test]
    fn test_channel_mode_parses_as_control_change() {
        // All Notes Off on channel 3
        let event = MidiEvent::from_bytes(7, &[0xB2, 0x7B, 0x00]).unwrap();
        assert_eq!(event, MidiEvent::control_change(7, 2, 0x7B, 0));
        assert_eq!(event.to_bytes(), vec![0xB2, 0x7B, 0x00]);

        // Reset All Controllers
        let event = MidiEvent::from_bytes(0, &[0xB0, 0x79, 0x00]).unwrap();
        assert_eq!(event, MidiEvent::control_change(0, 0, 0x79, 0));
    }

    #[test]
    fn test_program_change_is_two_bytes() {
        let event = MidiEvent::program_change(0, 1, 7);
        assert_eq!(event.to_bytes(), vec![0xC1, 7]);
    }

    #[test]
    fn test_channel_voice_len() {
        assert_eq!(channel_voice_len(0x90), Some(3));
        assert_eq!(channel_voice_len(0xC3), Some(2));
        assert_eq!(channel_voice_len(0xF0), None);
        assert_eq!(channel_voice_len(0x40), None);
    }
}
