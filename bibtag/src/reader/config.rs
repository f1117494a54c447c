// bibtag/src/reader/config.rs

use std::time::Duration;

use crate::utils::default_poll_interval;

/// Poll loop settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    /// Pause between the end of one poll cycle and the start of the next
    pub poll_interval: Duration,
    /// Close the transport when the worker stops
    pub disconnect_on_stop: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            disconnect_on_stop: false,
        }
    }
}

impl ReaderConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_disconnect_on_stop(mut self, disconnect: bool) -> Self {
        self.disconnect_on_stop = disconnect;
        self
    }
}
