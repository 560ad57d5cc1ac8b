//! In-process bridge: sender, loopback channel, and receiver wired together.
//!
//! ## Quick Start
//!
//! ```
//! use umpbridge_midi_io::{Received, UmpBridge};
//!
//! let mut bridge = UmpBridge::builder().group(0).build()?;
//! bridge.send_sysex(0, &[0xF0, 0x7E, 0x00, 0x06, 0x01, 0xF7])?;
//!
//! let received = bridge.poll();
//! assert_eq!(
//!     received,
//!     vec![Received::SysEx { timestamp: 0, bytes: vec![0x7E, 0x00, 0x06, 0x01] }]
//! );
//! # Ok::<(), umpbridge_midi_io::Error>(())
//! ```
//!
//! A real platform transport replaces the loopback: take the [`SysExSender`]
//! and [`SysExReceiver`] out with [`UmpBridge::into_parts`] and call them
//! from the platform's send path and receive callbacks.

mod builder;

pub use builder::{BridgeConfig, UmpBridgeBuilder};

use tracing::debug;

use crate::error::Result;
use crate::packet_list::MidiPacketList;
use crate::receiver::{Received, SysExReceiver};
use crate::sender::SysExSender;
use crate::transport::{UmpConsumer, UmpProducer};

/// Sender and receiver joined by the in-memory loopback.
pub struct UmpBridge {
    config: BridgeConfig,
    sender: SysExSender,
    receiver: SysExReceiver,
    producer: UmpProducer,
    consumer: UmpConsumer,
}

impl std::fmt::Debug for UmpBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UmpBridge")
            .field("config", &self.config)
            .field("sender", &self.sender)
            .field("receiver", &self.receiver)
            .field("pending", &self.consumer.pending_count())
            .finish_non_exhaustive()
    }
}

/// Owned pieces of a bridge.
pub struct BridgeParts {
    pub sender: SysExSender,
    pub receiver: SysExReceiver,
    pub producer: UmpProducer,
    pub consumer: UmpConsumer,
}

impl UmpBridge {
    /// Builder starting from [`BridgeConfig::default`].
    pub fn builder() -> UmpBridgeBuilder {
        UmpBridgeBuilder::default()
    }

    /// Builds a bridge from a loaded config, validating it first.
    pub fn from_config(config: BridgeConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    #[inline]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Returns the number of packets queued.
    pub fn send_sysex(&mut self, timestamp: u64, bytes: &[u8]) -> Result<usize> {
        self.sender.send_sysex(&mut self.producer, timestamp, bytes)
    }

    /// Queues a MIDI 1.0 Protocol Note On on the configured group.
    pub fn send_note_on(&mut self, timestamp: u64, channel: u8, note: u8, velocity: u8) -> Result<()> {
        self.sender
            .send_note_on(&mut self.producer, timestamp, channel, note, velocity)
    }

    /// Drains the loopback channel through the receiver.
    pub fn poll(&mut self) -> Vec<Received> {
        let lists = self.consumer.drain_all();
        if !lists.is_empty() {
            debug!("Polling {} event list(s)", lists.len());
        }
        let mut out = Vec::new();
        for list in &lists {
            out.extend(self.receiver.on_event_list(list));
        }
        out
    }

    /// Feeds a legacy MIDI 1.0 delivery straight to the receiver.
    pub fn receive_packet_list(&mut self, list: &MidiPacketList) -> Vec<Received> {
        self.receiver.on_packet_list(list)
    }

    /// Receive-side state, for `dropped()` and `in_progress()`.
    #[inline]
    pub fn receiver(&self) -> &SysExReceiver {
        &self.receiver
    }

    /// Splits the bridge so each end can move to its own thread.
    pub fn into_parts(self) -> BridgeParts {
        BridgeParts {
            sender: self.sender,
            receiver: self.receiver,
            producer: self.producer,
            consumer: self.consumer,
        }
    }
}
