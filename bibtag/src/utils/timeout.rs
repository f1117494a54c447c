//! Duration helpers for the poll loop.

use std::time::Duration;

use crate::constants::DEFAULT_POLL_INTERVAL_MS;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Pause between two poll cycles when the caller doesn't configure one.
pub fn default_poll_interval() -> Duration {
    ms(DEFAULT_POLL_INTERVAL_MS)
}
