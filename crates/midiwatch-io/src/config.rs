//! Listener configuration.

use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_DEVICE_NAME: &str = "Launchpad S";
pub const DEFAULT_CLIENT_NAME: &str = "midiwatch";
pub const DEFAULT_DISCONNECT_POLL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Input port to open.
    pub device_name: String,
    /// Name this process registers with the MIDI backend.
    pub client_name: String,
    /// How often an idle hardware port is checked for removal.
    pub disconnect_poll: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            disconnect_poll: DEFAULT_DISCONNECT_POLL,
        }
    }
}

impl ListenerConfig {
    pub fn builder() -> ListenerConfigBuilder {
        ListenerConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct ListenerConfigBuilder {
    config: ListenerConfig,
}

impl ListenerConfigBuilder {
    /// Default: "Launchpad S"
    pub fn device_name(mut self, name: impl Into<String>) -> Self {
        self.config.device_name = name.into();
        self
    }

    /// Default: "midiwatch"
    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.config.client_name = name.into();
        self
    }

    /// Default: 1s
    pub fn disconnect_poll(mut self, interval: Duration) -> Self {
        self.config.disconnect_poll = interval;
        self
    }

    pub fn build(self) -> Result<ListenerConfig> {
        if self.config.device_name.trim().is_empty() {
            return Err(Error::InvalidConfig("device name is empty".into()));
        }
        if self.config.client_name.trim().is_empty() {
            return Err(Error::InvalidConfig("client name is empty".into()));
        }
        if self.config.disconnect_poll.is_zero() {
            return Err(Error::InvalidConfig(
                "disconnect poll interval must be non-zero".into(),
            ));
        }
        Ok(self.config)
    }
}
