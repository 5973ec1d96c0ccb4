//! Notifier error types.

use garagehub_domain::error::GarageError;

/// Errors specific to the HTTP notifier.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The configured URL cannot be parsed.
    #[error("invalid notification url {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be built.
    #[error("unable to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the response not received.
    #[error("notification request failed")]
    Request(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("notification endpoint answered {0}")]
    Status(reqwest::StatusCode),
}

impl From<NotifyError> for GarageError {
    fn from(err: NotifyError) -> Self {
        Self::Notification(Box::new(err))
    }
}
