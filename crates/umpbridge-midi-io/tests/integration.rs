//! Integration tests for umpbridge-midi-io.
//!
//! These tests exercise sender -> transport -> receiver workflows without a platform MIDI service.

use umpbridge_midi_io::{
    zoom, BridgeConfig, MidiEvent, MidiPacketList, PacketTransport, Protocol, Received,
    SysExReceiver, SysExSender, UmpBridge, UmpEventList, UmpSysExPacket,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

// ---------------------------------------------------------------------------
// 1. Loopback bridge: send -> ring buffer -> poll
// ---------------------------------------------------------------------------

/// ZOOM pedal requests survive the loopback with framing removed.
#[test]
fn test_bridge_sysex_roundtrip() {
    init_tracing();
    let mut bridge = UmpBridge::builder().build().unwrap();

    bridge.send_sysex(0, &zoom::IDENTITY_REQUEST).unwrap();
    bridge
        .send_sysex(1, &zoom::parameter_edit_enable(zoom::MS_60B))
        .unwrap();
    bridge
        .send_sysex(2, &zoom::request_current_patch(zoom::MS_60B))
        .unwrap();

    let received = bridge.poll();
    assert_eq!(
        received,
        vec![
            Received::SysEx {
                timestamp: 0,
                bytes: vec![0x7E, 0x00, 0x06, 0x01]
            },
            Received::SysEx {
                timestamp: 1,
                bytes: vec![0x52, 0x00, 0x5F, 0x50]
            },
            Received::SysEx {
                timestamp: 2,
                bytes: vec![0x52, 0x00, 0x5F, 0x29]
            },
        ]
    );
    assert_eq!(bridge.receiver().dropped(), 0);
}

/// A patch-dump sized message spans many packets and arrives intact.
#[test]
fn test_bridge_long_sysex() {
    init_tracing();
    let mut bridge = UmpBridge::builder().group(7).build().unwrap();

    let mut message = vec![0xF0, 0x52, 0x00, 0x5F, 0x28];
    message.extend((0..200u32).map(|i| (i % 128) as u8));
    message.push(0xF7);

    let packets = bridge.send_sysex(10, &message).unwrap();
    assert_eq!(packets, (message.len() - 2).div_ceil(6));

    let received = bridge.poll();
    assert_eq!(
        received,
        vec![Received::SysEx {
            timestamp: 10,
            bytes: message[1..message.len() - 1].to_vec()
        }]
    );
}

/// Note On goes out as a MIDI 1.0 Protocol word and comes back as an event.
#[test]
fn test_bridge_note_on() {
    let mut bridge = UmpBridge::builder().build().unwrap();
    bridge.send_note_on(3, 2, 64, 90).unwrap();
    assert_eq!(
        bridge.poll(),
        vec![Received::ChannelVoice(MidiEvent::note_on(3, 2, 64, 90))]
    );
}

/// Nothing queued, nothing received.
#[test]
fn test_bridge_poll_empty() {
    let mut bridge = UmpBridge::builder().build().unwrap();
    assert!(bridge.poll().is_empty());
}

/// Bridge built from a config file.
#[test]
fn test_bridge_from_json_config() {
    let config: BridgeConfig =
        serde_json::from_str(r#"{ "group": 2, "event_list_capacity": 64, "channel_capacity": 1 }"#)
            .unwrap();
    let mut bridge = UmpBridge::from_config(config).unwrap();

    bridge.send_sysex(0, &[1, 2, 3]).unwrap();
    // Channel holds a single list
    assert!(bridge.send_sysex(0, &[4, 5, 6]).is_err());

    let parts = bridge.into_parts();
    assert_eq!(parts.sender.group(), 2);
}

// ---------------------------------------------------------------------------
// 2. Custom transport: caller-owned handles
// ---------------------------------------------------------------------------

/// Transport that keeps only the raw words, like a platform send call would see.
#[derive(Default)]
struct WordSink {
    words: Vec<u32>,
}

impl PacketTransport for WordSink {
    fn send(&mut self, list: UmpEventList) -> umpbridge_midi_io::Result<()> {
        assert_eq!(list.protocol(), Protocol::Midi2);
        self.words.extend(list.words());
        Ok(())
    }
}

#[test]
fn test_custom_transport_words() {
    let sender = SysExSender::default();
    let mut sink = WordSink::default();
    sender.send_sysex(&mut sink, 0, &[10; 6]).unwrap();
    assert_eq!(sink.words, vec![0x3006_0A0A, 0x0A0A_0A0A]);

    // Re-wrap the raw words as a received list
    let mut list = UmpEventList::new(Protocol::Midi2);
    list.add(0, &sink.words).unwrap();
    let mut receiver = SysExReceiver::new();
    assert_eq!(
        receiver.on_event_list(&list),
        vec![Received::SysEx {
            timestamp: 0,
            bytes: vec![10; 6]
        }]
    );
}

// ---------------------------------------------------------------------------
// 3. Both delivery paths agree
// ---------------------------------------------------------------------------

/// The same SysEx through the UMP path and the legacy byte path decodes identically.
#[test]
fn test_legacy_and_ump_paths_agree() {
    init_tracing();
    let message: Vec<u8> = std::iter::once(0xF0)
        .chain((0..40u8).map(|b| b & 0x7F))
        .chain(std::iter::once(0xF7))
        .collect();

    let ump_list = SysExSender::default().sysex_event_list(0, &message).unwrap();
    let mut ump_receiver = SysExReceiver::new();
    let from_ump = ump_receiver.on_event_list(&ump_list);

    let mut legacy = MidiPacketList::new();
    for chunk in message.chunks(7) {
        legacy.add(0, chunk);
    }
    let mut legacy_receiver = SysExReceiver::new();
    let from_legacy = legacy_receiver.on_packet_list(&legacy);

    assert_eq!(from_ump, from_legacy);
    assert_eq!(from_ump.len(), 1);
}

/// A malformed run in the middle of a stream is dropped; later messages still arrive.
#[test]
fn test_stream_continues_after_malformed_run() {
    init_tracing();
    let mut list = UmpEventList::new(Protocol::Midi2);
    let orphan_end = UmpSysExPacket::from_words(0x3032_0102, 0);
    list.add(0, &orphan_end.words()).unwrap();
    list.add_sysex(1, &umpbridge_midi::segment(&[9, 8, 7, 6, 5, 4, 3]).unwrap())
        .unwrap();

    let mut receiver = SysExReceiver::new();
    let received = receiver.on_event_list(&list);
    assert_eq!(receiver.dropped(), 1);
    assert_eq!(
        received,
        vec![Received::SysEx {
            timestamp: 1,
            bytes: vec![9, 8, 7, 6, 5, 4, 3]
        }]
    );
}
