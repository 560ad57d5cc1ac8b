//! System Exclusive over UMP (SysEx-in-64-bits, message type 0x3).
//!
//! This module provides:
//! - [`SysExSegmenter`]: MIDI 1.0 SysEx bytes to 64-bit UMP packets
//! - [`UmpPacketDecoder`]: packets back to bytes, validating the run grammar
//! - [`SysExAssembler`]: streaming reassembly across transport deliveries
//!
//! A message travels either as a single `Complete` packet or as
//! `Start, Continue*, End`. Every packet but the last carries six bytes.

mod decode;
mod packet;
mod segment;

pub use decode::{decode, SysExAssembler, UmpPacketDecoder};
pub use packet::{PacketPayload, SysExStatus, UmpSysExPacket};
pub use segment::{segment, strip_framing, Segments, SysExSegmenter, FRAMING_STRIP_MIN_LEN};

/// UMP message type of SysEx-in-64-bits.
pub const SYSEX7_MESSAGE_TYPE: u8 = 0x3;

/// Payload bytes per packet.
pub const MAX_PACKET_PAYLOAD: usize = 6;

pub const SYSEX_START: u8 = 0xF0;
pub const SYSEX_END: u8 = 0xF7;
