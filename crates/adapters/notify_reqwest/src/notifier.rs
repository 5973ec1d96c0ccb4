//! [`OpenNotifier`] implementation over HTTP.

use garagehub_app::ports::OpenNotifier;
use garagehub_domain::accessory::NotifyTarget;
use garagehub_domain::error::GarageError;

use crate::config::NotifyConfig;
use crate::error::NotifyError;

/// Posts to a fixed URL with basic-auth credentials.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    url: String,
    username: String,
    password: Option<String>,
}

impl HttpNotifier {
    /// Build a notifier with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Client`] if the client cannot be built, or
    /// [`NotifyError::InvalidUrl`] if the target URL is not usable.
    pub fn new(target: &NotifyTarget, config: &NotifyConfig) -> Result<Self, NotifyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(NotifyError::Client)?;
        Self::with_client(client, target)
    }

    /// Build a notifier sharing an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::InvalidUrl`] if the target URL is not usable.
    pub fn with_client(client: reqwest::Client, target: &NotifyTarget) -> Result<Self, NotifyError> {
        let url = target.url().to_string();
        client
            .post(&url)
            .build()
            .map_err(|source| NotifyError::InvalidUrl {
                url: url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            url,
            username: target.username().to_string(),
            password: target.password().map(ToString::to_string),
        })
    }

    /// The URL notifications are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.username, self.password.as_deref())
            .body("")
            .send()
            .await
            .map_err(NotifyError::Request)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Status(status))
        }
    }
}

impl OpenNotifier for HttpNotifier {
    async fn notify_open(&self, accessory: &str) -> Result<(), GarageError> {
        tracing::debug!(accessory, url = %self.url, "posting open notification");
        self.post().await?;
        Ok(())
    }
}
