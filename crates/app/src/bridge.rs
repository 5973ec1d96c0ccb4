//! Bridge — hosts a set of door accessories and routes host requests to
//! them by id.

use std::collections::BTreeMap;

use garagehub_domain::capability::Capability;
use garagehub_domain::door::{DoorPosition, DoorState};
use garagehub_domain::error::{GarageError, NotFoundError, ValidationError};

use crate::accessory::DoorAccessory;
use crate::ports::{EventPublisher, OpenNotifier, StateStore};

/// Registry of accessories keyed by their id.
pub struct Bridge<S, N, P> {
    accessories: BTreeMap<String, DoorAccessory<S, N, P>>,
}

impl<S, N, P> Default for Bridge<S, N, P> {
    fn default() -> Self {
        Self {
            accessories: BTreeMap::new(),
        }
    }
}

impl<S, N, P> Bridge<S, N, P>
where
    S: StateStore + Send + Sync + 'static,
    N: OpenNotifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create an empty bridge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an accessory.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateAccessory`] if an accessory with
    /// the same id is already registered.
    pub fn add(&mut self, accessory: DoorAccessory<S, N, P>) -> Result<(), GarageError> {
        let id = accessory.id().to_string();
        if self.accessories.contains_key(&id) {
            return Err(ValidationError::DuplicateAccessory(id).into());
        }
        tracing::info!(accessory = %id, name = %accessory.name(), "accessory registered");
        self.accessories.insert(id, accessory);
        Ok(())
    }

    /// Look up an accessory by id.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::NotFound`] when no accessory has this id.
    pub fn get(&self, id: &str) -> Result<&DoorAccessory<S, N, P>, GarageError> {
        self.accessories.get(id).ok_or_else(|| {
            NotFoundError {
                entity: "Accessory",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// All accessories, ordered by id.
    pub fn list(&self) -> impl Iterator<Item = &DoorAccessory<S, N, P>> {
        self.accessories.values()
    }

    /// Number of registered accessories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accessories.len()
    }

    /// Whether no accessory is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accessories.is_empty()
    }

    /// Capabilities of the accessory `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::NotFound`] for an unknown id.
    pub fn capabilities(&self, id: &str) -> Result<Vec<Capability>, GarageError> {
        Ok(self.get(id)?.capabilities())
    }

    /// Target position of the accessory `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::NotFound`] for an unknown id.
    pub fn get_target_state(&self, id: &str) -> Result<DoorPosition, GarageError> {
        Ok(self.get(id)?.target_state())
    }

    /// Forward a "set target state" request to the accessory `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::NotFound`] for an unknown id.
    pub async fn set_target_state(
        &self,
        id: &str,
        value: &serde_json::Value,
    ) -> Result<DoorState, GarageError> {
        self.get(id)?.set_target_state(value).await
    }
}
