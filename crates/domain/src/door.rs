//! Door — position and state of a garage door accessory.
//!
//! A door has a *target* position (last commanded) and a *current* position
//! (reported). No actuator is modeled, so `current` converges to `target`
//! immediately on every transition.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Position of a garage door.
///
/// Encoded on the wire with the HomeKit `TargetDoorState` /
/// `CurrentDoorState` numbering: `OPEN = 0`, `CLOSED = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorPosition {
    Open,
    Closed,
}

impl DoorPosition {
    /// HomeKit characteristic value for this position.
    #[must_use]
    pub fn as_characteristic(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Closed => 1,
        }
    }

    /// Interpret a raw characteristic value.
    ///
    /// Accepts the numeric encoding (`0`, `1`) and the lowercase names
    /// (`"open"`, `"closed"`). Anything else yields `None`.
    #[must_use]
    pub fn from_characteristic(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(0) => Some(Self::Open),
                Some(1) => Some(Self::Closed),
                _ => None,
            },
            serde_json::Value::String(s) => match s.as_str() {
                "open" => Some(Self::Open),
                "closed" => Some(Self::Closed),
                _ => None,
            },
            _ => None,
        }
    }

    /// Restore a position from a persisted "is open" value.
    ///
    /// A missing value or `true` means open. Any other stored value means
    /// closed.
    #[must_use]
    pub fn from_persisted(value: Option<&serde_json::Value>) -> Self {
        match value {
            None | Some(serde_json::Value::Bool(true)) => Self::Open,
            Some(_) => Self::Closed,
        }
    }

    /// The "is open" value to persist for this position.
    #[must_use]
    pub fn to_persisted(self) -> serde_json::Value {
        serde_json::Value::Bool(self == Self::Open)
    }
}

impl std::fmt::Display for DoorPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

/// Mutable state of a single door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorState {
    /// Reported position.
    pub current: DoorPosition,
    /// Last commanded position.
    pub target: DoorPosition,
    /// When the door was last opened through a command. Diagnostic only.
    pub last_opened_at: Option<Timestamp>,
}

impl DoorState {
    /// A door resting at `position`, never opened in this process.
    #[must_use]
    pub fn at(position: DoorPosition) -> Self {
        Self {
            current: position,
            target: position,
            last_opened_at: None,
        }
    }

    /// Command the door open.
    pub fn open(&mut self, ts: Timestamp) {
        self.target = DoorPosition::Open;
        self.current = DoorPosition::Open;
        self.last_opened_at = Some(ts);
    }

    /// Command the door closed.
    pub fn close(&mut self) {
        self.target = DoorPosition::Closed;
        self.current = DoorPosition::Closed;
    }

    /// Whether the door currently reports open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current == DoorPosition::Open
    }
}
