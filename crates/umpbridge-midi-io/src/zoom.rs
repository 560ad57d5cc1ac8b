//! Framed SysEx requests for ZOOM MS-series effect pedals.
//!
//! These are plain MIDI 1.0 messages; send them through
//! [`SysExSender`](crate::SysExSender) to get UMP packets.

/// ZOOM manufacturer ID.
pub const MANUFACTURER_ID: u8 = 0x52;

/// Model ID of the MS-60B.
pub const MS_60B: u8 = 0x5F;

/// Model ID of the MS-50G.
pub const MS_50G: u8 = 0x58;

/// Universal non-real-time identity request, any device.
pub const IDENTITY_REQUEST: [u8; 6] = [0xF0, 0x7E, 0x00, 0x06, 0x01, 0xF7];

const PARAMETER_EDIT_ENABLE: u8 = 0x50;
const REQUEST_CURRENT_PATCH: u8 = 0x29;

fn request(model: u8, command: u8) -> [u8; 6] {
    [0xF0, MANUFACTURER_ID, 0x00, model & 0x7F, command, 0xF7]
}

/// Puts the pedal into parameter edit mode.
pub fn parameter_edit_enable(model: u8) -> [u8; 6] {
    request(model, PARAMETER_EDIT_ENABLE)
}

/// Asks the pedal to dump the current patch.
pub fn request_current_patch(model: u8) -> [u8; 6] {
    request(model, REQUEST_CURRENT_PATCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use umpbridge_midi::SysExSegmenter;

    #[test]
    fn test_requests() {
        assert_eq!(
            parameter_edit_enable(MS_60B),
            [0xF0, 0x52, 0x00, 0x5F, 0x50, 0xF7]
        );
        assert_eq!(
            request_current_patch(MS_50G),
            [0xF0, 0x52, 0x00, 0x58, 0x29, 0xF7]
        );
    }

    #[test]
    fn test_requests_fit_one_packet() {
        let segmenter = SysExSegmenter::new();
        for bytes in [
            IDENTITY_REQUEST,
            parameter_edit_enable(MS_60B),
            request_current_patch(MS_60B),
        ] {
            assert_eq!(segmenter.segment(&bytes).unwrap().len(), 1);
        }
        assert_eq!(
            segmenter.segment_words(&IDENTITY_REQUEST).unwrap(),
            vec![0x3004_7E00, 0x0601_0000]
        );
    }
}
