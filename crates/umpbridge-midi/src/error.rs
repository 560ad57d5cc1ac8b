//! Error types for the UMP codec.

use thiserror::Error;

use crate::sysex::SysExStatus;

/// Why a status sequence was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunViolation {
    /// `Continue` or `End` with no `Start` before it.
    NotStarted,
    /// `Start` or `Complete` while an earlier run is still open.
    Interrupted,
    /// The input ended before the open run reached `End`.
    Unterminated,
}

impl std::fmt::Display for RunViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RunViolation::NotStarted => "no open run",
            RunViolation::Interrupted => "previous run still open",
            RunViolation::Unterminated => "run not terminated",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("SysEx payload is empty")]
    EmptyPayload,

    #[error("Unsupported UMP message type: {0:#x}")]
    UnsupportedMessageType(u8),

    #[error("Malformed SysEx run at packet {index}: {status:?} ({reason})")]
    MalformedRun {
        index: usize,
        status: SysExStatus,
        reason: RunViolation,
    },

    #[error("Invalid SysEx status nibble: {0:#x}")]
    InvalidStatus(u8),

    #[error("Invalid SysEx byte count: {0} (max 6)")]
    InvalidByteCount(u8),

    #[error("Invalid UMP group: {0} (max 15)")]
    InvalidGroup(u8),

    #[error("Truncated UMP packet: {words} word(s) left over")]
    TruncatedPacket { words: usize },

    #[error("MIDI parse error: {0}")]
    MidiParse(String),
}

impl From<midi_msg::ParseError> for ConversionError {
    fn from(e: midi_msg::ParseError) -> Self {
        ConversionError::MidiParse(format!("{:?}", e))
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
