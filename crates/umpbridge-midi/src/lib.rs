//! MIDI 1.0 <-> Universal MIDI Packet codec.
//!
//! Pure types and functions, no I/O and no shared state. Everything here is
//! safe to call from a MIDI driver callback.
//!
//! # Features
//!
//! - **SysEx segmentation**: MIDI 1.0 SysEx bytes to 64-bit UMP packets
//! - **SysEx decoding**: packets back to bytes, one-shot or streaming
//! - **MIDI 1.0 Protocol**: channel voice messages in 32-bit UMP packets
//! - **Message types**: packet sizes for splitting flat word streams
//!
//! # Example
//!
//! ```
//! use umpbridge_midi::{decode, segment, SysExStatus};
//!
//! let packets = segment(&[0xF0, 0x7E, 0x00, 0x06, 0x01, 0xF7])?;
//! assert_eq!(packets.len(), 1);
//! assert_eq!(packets[0].status()?, SysExStatus::Complete);
//! assert_eq!(decode(&packets)?, vec![0x7E, 0x00, 0x06, 0x01]);
//! # Ok::<(), umpbridge_midi::ConversionError>(())
//! ```

pub mod error;
pub use error::{ConversionError, Result, RunViolation};

pub mod sysex;
pub use sysex::{
    decode, segment, strip_framing, PacketPayload, Segments, SysExAssembler, SysExSegmenter,
    SysExStatus, UmpPacketDecoder, UmpSysExPacket,
};

pub mod ump;
pub use ump::{split_packets, MessageType};

pub mod midi1;

pub(crate) mod event;
pub use event::{channel_voice_len, MidiEvent};

pub mod hex;
pub use hex::{HexBytes, HexWords};

// Re-export essential upstream types
pub use midi_msg::{Channel, ChannelVoiceMsg, ControlChange, MidiMsg};
