//! # umpbridge - MIDI 1.0 SysEx <-> Universal MIDI Packet codec
//!
//! ## Architecture
//!
//! umpbridge is an umbrella crate that coordinates:
//! - **umpbridge-midi** - Pure codec (SysEx segmentation/decoding, MIDI 1.0 Protocol words)
//! - **umpbridge-midi-io** - Transport boundary (event lists, legacy packet lists, loopback bridge)
//!
//! ## Quick Start
//!
//! ```
//! use umpbridge::prelude::*;
//!
//! // MIDI 1.0 SysEx -> 64-bit UMP packets
//! let packets = segment(&[0xF0, 0x7E, 0x00, 0x06, 0x01, 0xF7])?;
//! assert_eq!(packets[0].words(), [0x3004_7E00, 0x0601_0000]);
//!
//! // ... and back
//! assert_eq!(decode(&packets)?, vec![0x7E, 0x00, 0x06, 0x01]);
//! # Ok::<(), umpbridge::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Codec plus transport boundary
//! - `io` - Event lists, packet lists, loopback bridge

/// Re-export of umpbridge-midi for direct access
pub use umpbridge_midi as midi;

#[cfg(feature = "io")]
/// Re-export of umpbridge-midi-io for direct access
pub use umpbridge_midi_io as io;

pub use umpbridge_midi::{
    decode, segment, ConversionError, MessageType, MidiEvent, SysExAssembler, SysExSegmenter,
    SysExStatus, UmpPacketDecoder, UmpSysExPacket,
};

#[cfg(feature = "io")]
pub use umpbridge_midi_io::{
    BridgeConfig, MidiPacketList, PacketTransport, Protocol, Received, SysExReceiver,
    SysExSender, UmpBridge, UmpEventList,
};

mod error;
pub use error::{Error, Result};

/// Convenience prelude for common imports
pub mod prelude {
    // Codec
    pub use crate::midi::{
        decode, segment, SysExAssembler, SysExSegmenter, SysExStatus, UmpPacketDecoder,
        UmpSysExPacket,
    };

    // Transport boundary
    #[cfg(feature = "io")]
    pub use crate::io::{
        MidiPacketList, PacketTransport, Protocol, Received, SysExReceiver, SysExSender,
        UmpBridge, UmpEventList,
    };
}
