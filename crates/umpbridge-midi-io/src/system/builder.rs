//! UmpBridge builder and its serializable configuration.

use serde::{Deserialize, Serialize};
use umpbridge_midi::{ump::MAX_GROUP, SysExSegmenter};

use crate::error::{Error, Result};
use crate::event_list::DEFAULT_EVENT_LIST_CAPACITY;
use crate::receiver::SysExReceiver;
use crate::sender::SysExSender;
use crate::transport::ump_channel_with_capacity;

use super::UmpBridge;

/// Bridge settings. Every field has a default, so a partial file is fine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// UMP group stamped on outgoing packets (0-15).
    pub group: u8,
    /// Word capacity of each outgoing event list.
    pub event_list_capacity: usize,
    /// Event lists the loopback channel can hold.
    pub channel_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            group: 0,
            event_list_capacity: DEFAULT_EVENT_LIST_CAPACITY,
            channel_capacity: 256,
        }
    }
}

impl BridgeConfig {
    /// Checks ranges the bridge cannot run with. `build` calls this.
    pub fn validate(&self) -> Result<()> {
        if self.group > MAX_GROUP {
            return Err(Error::InvalidConfig(format!(
                "group {} out of range 0-{}",
                self.group, MAX_GROUP
            )));
        }
        // One SysEx7 packet is two words
        if self.event_list_capacity < 2 {
            return Err(Error::InvalidConfig(format!(
                "event_list_capacity {} cannot hold a SysEx packet",
                self.event_list_capacity
            )));
        }
        if self.channel_capacity == 0 {
            return Err(Error::InvalidConfig("channel_capacity must be > 0".into()));
        }
        Ok(())
    }
}

/// Builds a [`UmpBridge`] from a [`BridgeConfig`], field by field or whole.
#[derive(Default)]
pub struct UmpBridgeBuilder {
    pub(super) config: BridgeConfig,
}

impl UmpBridgeBuilder {
    /// Replaces every setting at once.
    pub fn config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn group(mut self, group: u8) -> Self {
        self.config.group = group;
        self
    }

    pub fn event_list_capacity(mut self, words: usize) -> Self {
        self.config.event_list_capacity = words;
        self
    }

    pub fn channel_capacity(mut self, lists: usize) -> Self {
        self.config.channel_capacity = lists;
        self
    }

    pub fn build(self) -> Result<UmpBridge> {
        self.config.validate()?;

        let segmenter = SysExSegmenter::with_group(self.config.group)?;
        let sender = SysExSender::new(segmenter, self.config.event_list_capacity);
        let (producer, consumer) = ump_channel_with_capacity(self.config.channel_capacity)?;

        Ok(UmpBridge {
            config: self.config,
            sender,
            receiver: SysExReceiver::new(),
            producer,
            consumer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_build() {
        let bridge = UmpBridgeBuilder::default().build().unwrap();
        assert_eq!(bridge.config(), &BridgeConfig::default());
        assert_eq!(bridge.config().event_list_capacity, 1024);
    }

    #[test]
    fn test_build_rejects_bad_group() {
        let err = UmpBridgeBuilder::default().group(16).build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_build_rejects_tiny_capacity() {
        let err = UmpBridgeBuilder::default()
            .event_list_capacity(1)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = UmpBridgeBuilder::default()
            .channel_capacity(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: BridgeConfig = serde_json::from_str(r#"{ "group": 4 }"#).unwrap();
        assert_eq!(config.group, 4);
        assert_eq!(config.event_list_capacity, 1024);
        assert_eq!(config.channel_capacity, 256);
    }
}
