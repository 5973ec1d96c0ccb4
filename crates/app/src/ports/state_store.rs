//! Storage port — synchronous key/value persistence.
//!
//! The door accessory stores a single "is open" flag under its name. Access
//! is synchronous and process-local; implementations are expected to be
//! quick (a small file or an in-memory map).

use garagehub_domain::error::GarageError;

/// Key/value store surviving process restarts.
pub trait StateStore {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing usable is stored, including entries
    /// that exist but cannot be decoded.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::Storage`] when the backing medium fails.
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, GarageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::Storage`] when the value cannot be written.
    fn set(&self, key: &str, value: serde_json::Value) -> Result<(), GarageError>;
}

impl<T: StateStore> StateStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, GarageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<(), GarageError> {
        (**self).set(key, value)
    }
}
