//! Accessory configuration — immutable settings of one virtual garage door.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::time::delay_from_secs;

/// Name used when the configuration does not provide one.
pub const DEFAULT_NAME: &str = "Dummy Garage";

/// Notification URL used when the configuration does not provide one.
pub const LOCAL_NOTIFY_URL: &str = "http://127.0.0.1:31337/";

/// Basic-auth username used when the configuration does not provide one.
pub const LOCAL_NOTIFY_USER: &str = "garagehub";

/// Configuration of a single door accessory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessoryConfig {
    /// Display name, also used as the persistence key. A blank name falls
    /// back to [`DEFAULT_NAME`].
    #[serde(deserialize_with = "deserialize_name")]
    pub name: String,
    /// Seconds after an open before the door closes itself. `<= 0` disables.
    ///
    /// Numeric strings are accepted; any other string disables auto-close.
    #[serde(deserialize_with = "deserialize_seconds")]
    pub auto_close_delay: f64,
    /// Where to send the open notification.
    pub notify: NotifyTarget,
    /// Static identification metadata.
    pub information: AccessoryInformation,
    /// Cancel a pending auto-close when the door is commanded again.
    ///
    /// When `false`, every open schedules an independent timer that always
    /// fires, even if the door was closed and reopened in the meantime.
    pub cancel_superseded_close: bool,
}

impl Default for AccessoryConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            auto_close_delay: 0.0,
            notify: NotifyTarget::default(),
            information: AccessoryInformation::default(),
            cancel_superseded_close: true,
        }
    }
}

impl AccessoryConfig {
    /// Create a configuration with the given name and defaults elsewhere.
    ///
    /// A blank name is replaced by [`DEFAULT_NAME`].
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name_or_default(name.into()),
            ..Self::default()
        }
    }

    /// Set the auto-close delay in seconds.
    #[must_use]
    pub fn with_auto_close_delay(mut self, secs: f64) -> Self {
        self.auto_close_delay = secs;
        self
    }

    /// Set the notification target.
    #[must_use]
    pub fn with_notify(mut self, notify: NotifyTarget) -> Self {
        self.notify = notify;
        self
    }

    /// The auto-close delay, or `None` when auto-close is disabled.
    #[must_use]
    pub fn auto_close(&self) -> Option<Duration> {
        delay_from_secs(self.auto_close_delay)
    }

    /// Stable identifier derived from the name (see [`slugify`]).
    #[must_use]
    pub fn id(&self) -> String {
        slugify(&self.name)
    }

    /// Validate invariants.
    ///
    /// # Errors
    ///
    /// - `name` has no ASCII alphanumerics to derive an id from
    ///   ([`ValidationError::EmptyName`])
    /// - `notify.url` is present but blank ([`ValidationError::EmptyNotifyUrl`])
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.notify.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(ValidationError::EmptyNotifyUrl);
        }
        Ok(())
    }
}

fn name_or_default(name: String) -> String {
    if name.trim().is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name
    }
}

fn deserialize_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(name_or_default)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
    Number(f64),
    Text(String),
}

fn deserialize_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Seconds::deserialize(deserializer)? {
        Seconds::Number(secs) => secs,
        Seconds::Text(text) => parse_seconds(&text),
    })
}

/// Empty text is zero; text that is not a number yields NaN, which
/// [`delay_from_secs`] treats as disabled.
fn parse_seconds(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        0.0
    } else {
        text.parse().unwrap_or(f64::NAN)
    }
}

/// Destination and credentials of the open notification.
///
/// When `url` is absent the notification goes to the local listener at
/// [`LOCAL_NOTIFY_URL`]; when `user` is absent [`LOCAL_NOTIFY_USER`] is sent.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyTarget {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl NotifyTarget {
    /// Target an explicit URL with basic-auth credentials.
    #[must_use]
    pub fn new(url: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            user: Some(user.into()),
            password: Some(password.into()),
        }
    }

    /// Effective URL.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(LOCAL_NOTIFY_URL)
    }

    /// Effective basic-auth username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.user.as_deref().unwrap_or(LOCAL_NOTIFY_USER)
    }

    /// Basic-auth password, if any.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl std::fmt::Debug for NotifyTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyTarget")
            .field("url", &self.url())
            .field("user", &self.username())
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Static identification strings exposed through the information service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessoryInformation {
    pub manufacturer: String,
    pub model: String,
    pub firmware_revision: String,
    pub serial_number: String,
}

impl Default for AccessoryInformation {
    fn default() -> Self {
        Self {
            manufacturer: "garagehub".to_string(),
            model: "Virtual Garage Door".to_string(),
            firmware_revision: env!("CARGO_PKG_VERSION").to_string(),
            serial_number: "0000000000001".to_string(),
        }
    }
}

/// Turn a display name into an identifier: lowercase ASCII alphanumerics,
/// every other run of characters collapsed into a single `_`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = AccessoryConfig::default();
        assert_eq!(config.name, "Dummy Garage");
        assert_eq!(config.auto_close(), None);
        assert_eq!(config.notify.url(), LOCAL_NOTIFY_URL);
        assert_eq!(config.notify.username(), LOCAL_NOTIFY_USER);
        assert!(config.cancel_superseded_close);
    }

    #[test]
    fn should_convert_auto_close_delay() {
        let config = AccessoryConfig::named("Gate").with_auto_close_delay(2.0);
        assert_eq!(config.auto_close(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn should_treat_negative_delay_as_disabled() {
        let config = AccessoryConfig::named("Gate").with_auto_close_delay(-5.0);
        assert_eq!(config.auto_close(), None);
    }

    #[test]
    fn should_fall_back_to_default_name_when_blank() {
        assert_eq!(AccessoryConfig::named("").name, DEFAULT_NAME);
        assert_eq!(AccessoryConfig::named("   ").name, DEFAULT_NAME);
        assert!(AccessoryConfig::named("").validate().is_ok());
    }

    #[test]
    fn should_deserialize_blank_name_as_default() {
        let config: AccessoryConfig =
            serde_json::from_value(serde_json::json!({ "name": "" })).unwrap();
        assert_eq!(config.name, DEFAULT_NAME);
        assert_eq!(config.id(), "dummy_garage");
    }

    #[test]
    fn should_coerce_numeric_string_delay() {
        let config: AccessoryConfig =
            serde_json::from_value(serde_json::json!({ "auto_close_delay": "2" })).unwrap();
        assert_eq!(config.auto_close(), Some(Duration::from_secs(2)));

        let config: AccessoryConfig =
            serde_json::from_value(serde_json::json!({ "auto_close_delay": " 0.5 " })).unwrap();
        assert_eq!(config.auto_close(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn should_disable_auto_close_for_non_numeric_delay() {
        for raw in ["", "soon"] {
            let config: AccessoryConfig =
                serde_json::from_value(serde_json::json!({ "auto_close_delay": raw })).unwrap();
            assert_eq!(config.auto_close(), None);
        }
    }

    #[test]
    fn should_reject_name_without_id_characters() {
        let config = AccessoryConfig::named("###");
        assert_eq!(config.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn should_reject_blank_notify_url() {
        let config =
            AccessoryConfig::named("Gate").with_notify(NotifyTarget::new("", "alice", "secret"));
        assert_eq!(config.validate(), Err(ValidationError::EmptyNotifyUrl));
    }

    #[test]
    fn should_accept_default_config() {
        assert!(AccessoryConfig::default().validate().is_ok());
    }

    #[test]
    fn should_slugify_names() {
        assert_eq!(slugify("Dummy Garage"), "dummy_garage");
        assert_eq!(slugify("  Front -- Gate #2 "), "front_gate_2");
        assert_eq!(slugify("Garage"), "garage");
    }

    #[test]
    fn should_redact_password_in_debug_output() {
        let target = NotifyTarget::new("http://example.com", "alice", "hunter2");
        let debug = format!("{target:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn should_use_explicit_notify_target() {
        let target = NotifyTarget::new("http://example.com/hook", "alice", "secret");
        assert_eq!(target.url(), "http://example.com/hook");
        assert_eq!(target.username(), "alice");
        assert_eq!(target.password(), Some("secret"));
    }

    #[test]
    fn should_deserialize_partial_config_with_defaults() {
        let json = serde_json::json!({ "name": "Shed", "auto_close_delay": 2 });
        let config: AccessoryConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.name, "Shed");
        assert_eq!(config.auto_close(), Some(Duration::from_secs(2)));
        assert_eq!(config.notify, NotifyTarget::default());
        assert!(config.cancel_superseded_close);
    }
}
