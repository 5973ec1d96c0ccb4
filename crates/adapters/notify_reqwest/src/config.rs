//! HTTP notifier configuration.

use std::time::Duration;

use serde::Deserialize;

/// Transport settings shared by all HTTP notifiers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Whole-request timeout in seconds. Unset keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl NotifyConfig {
    /// The request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
