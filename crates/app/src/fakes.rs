//! In-memory port implementations shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;

use garagehub_domain::error::GarageError;

use crate::ports::{OpenNotifier, StateStore};

/// Key/value store kept in memory, recording every write.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, serde_json::Value>>,
    writes: Mutex<Vec<serde_json::Value>>,
    failing: bool,
}

impl MemoryStore {
    pub fn with(key: &str, value: serde_json::Value) -> Self {
        let store = Self::default();
        store.values.lock().unwrap().insert(key.to_string(), value);
        store
    }

    /// A store whose reads and writes always fail.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn value(&self, key: &str) -> Option<serde_json::Value> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn writes(&self) -> Vec<serde_json::Value> {
        self.writes.lock().unwrap().clone()
    }

    fn broken() -> GarageError {
        GarageError::Storage(Box::new(std::io::Error::other("store unavailable")))
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, GarageError> {
        if self.failing {
            return Err(Self::broken());
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<(), GarageError> {
        if self.failing {
            return Err(Self::broken());
        }
        self.writes.lock().unwrap().push(value.clone());
        self.values.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

/// Notifier forwarding the accessory id of every notification to a channel.
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<String>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl OpenNotifier for RecordingNotifier {
    async fn notify_open(&self, accessory: &str) -> Result<(), GarageError> {
        let _ = self.tx.send(accessory.to_string());
        Ok(())
    }
}

/// Notifier that always fails.
pub struct FailingNotifier;

impl OpenNotifier for FailingNotifier {
    async fn notify_open(&self, _accessory: &str) -> Result<(), GarageError> {
        Err(GarageError::Notification(Box::new(std::io::Error::other(
            "connection refused",
        ))))
    }
}
