//! Transport boundary for the UMP codec.
//!
//! Provides the delivery records a platform MIDI service works in, the
//! [`PacketTransport`] seam, and the sending/receiving adapters around the
//! pure codec in `umpbridge-midi`.
//!
//! Two receive paths (UMP event lists and legacy MIDI 1.0 packet lists)
//! share one SysEx assembler, see [`SysExReceiver`].

pub mod error;
pub use error::{Error, Result};

mod system;
pub use system::{BridgeConfig, BridgeParts, UmpBridge, UmpBridgeBuilder};

pub mod event_list;
pub use event_list::{EventPacket, Protocol, UmpEventList, DEFAULT_EVENT_LIST_CAPACITY};

pub mod packet_list;
pub use packet_list::{MidiPacket, MidiPacketList};

pub mod transport;
pub use transport::{
    ump_channel, ump_channel_with_capacity, PacketTransport, UmpConsumer, UmpProducer,
};

mod sender;
pub use sender::SysExSender;

mod receiver;
pub use receiver::{Received, SysExReceiver};

pub mod zoom;

pub use umpbridge_midi::{
    ConversionError, MidiEvent, SysExSegmenter, SysExStatus, UmpPacketDecoder, UmpSysExPacket,
};
