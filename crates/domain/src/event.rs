//! Event — an immutable record of a door transition.
//!
//! Events let the host push characteristic updates it did not request
//! itself, most notably an auto-close.

use serde::{Deserialize, Serialize};

use crate::door::DoorState;
use crate::time::{Timestamp, now};

/// What happened to the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorEventKind {
    /// Opened by a target-state command.
    Opened,
    /// Closed by a target-state command.
    Closed,
    /// Closed by the auto-close timer.
    AutoClosed,
}

/// A door transition, with the resulting state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorEvent {
    /// Identifier of the accessory that changed.
    pub accessory: String,
    pub kind: DoorEventKind,
    /// State after the transition.
    pub state: DoorState,
    pub timestamp: Timestamp,
}

impl DoorEvent {
    /// Record a transition happening now.
    #[must_use]
    pub fn new(accessory: impl Into<String>, kind: DoorEventKind, state: DoorState) -> Self {
        Self {
            accessory: accessory.into(),
            kind,
            state,
            timestamp: now(),
        }
    }
}
