//! Door accessory — the garage door state machine.
//!
//! Two positions, transitions driven only by target-state commands and the
//! auto-close timer:
//!
//! | command | effect |
//! |---------|--------|
//! | open    | current = target = open, persist `true`, publish, notify, arm auto-close |
//! | close   | current = target = closed, persist `false`, publish |
//! | other   | nothing |
//!
//! The position is persisted under the accessory name and restored on
//! construction (missing or unreadable value → open).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use garagehub_domain::accessory::AccessoryConfig;
use garagehub_domain::capability::{Capability, garage_door_capabilities};
use garagehub_domain::door::{DoorPosition, DoorState};
use garagehub_domain::error::GarageError;
use garagehub_domain::event::{DoorEvent, DoorEventKind};
use garagehub_domain::time::now;

use crate::ports::{EventPublisher, OpenNotifier, StateStore};

/// A virtual garage door exposed to a host.
///
/// Generic over its ports to avoid dynamic dispatch. The door state lives
/// behind a mutex that is never held across an `.await`, so every transition
/// (state change + persistence) is atomic with respect to other commands and
/// to the auto-close timer.
pub struct DoorAccessory<S, N, P> {
    config: AccessoryConfig,
    notifier: Arc<N>,
    shared: Arc<Shared<S, P>>,
}

/// State reachable from the auto-close task.
struct Shared<S, P> {
    id: String,
    name: String,
    store: S,
    publisher: P,
    door: Mutex<Door>,
}

struct Door {
    state: DoorState,
    /// Bumped on every transition; an auto-close armed under an older epoch
    /// has been superseded.
    epoch: u64,
    pending_close: Option<JoinHandle<()>>,
}

impl Door {
    fn cancel_pending_close(&mut self) {
        if let Some(handle) = self.pending_close.take() {
            handle.abort();
        }
    }
}

impl<S, N, P> DoorAccessory<S, N, P>
where
    S: StateStore + Send + Sync + 'static,
    N: OpenNotifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create the accessory and restore its position from `store`.
    ///
    /// A read failure is logged and treated as "nothing persisted".
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::Validation`] if `config` is invalid.
    pub fn new(
        config: AccessoryConfig,
        store: S,
        notifier: N,
        publisher: P,
    ) -> Result<Self, GarageError> {
        config.validate()?;

        let cached = store.get(&config.name).unwrap_or_else(|err| {
            tracing::warn!(accessory = %config.name, error = ?err, "ignoring unreadable cached state");
            None
        });
        let position = DoorPosition::from_persisted(cached.as_ref());
        tracing::debug!(
            accessory = %config.name,
            cached = ?cached,
            %position,
            "restored door state"
        );

        let shared = Shared {
            id: config.id(),
            name: config.name.clone(),
            store,
            publisher,
            door: Mutex::new(Door {
                state: DoorState::at(position),
                epoch: 0,
                pending_close: None,
            }),
        };

        Ok(Self {
            config,
            notifier: Arc::new(notifier),
            shared: Arc::new(shared),
        })
    }

    /// Identifier derived from the accessory name.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.shared.id
    }

    /// Display name, also the persistence key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// The configuration this accessory was built from.
    #[must_use]
    pub fn config(&self) -> &AccessoryConfig {
        &self.config
    }

    /// Snapshot of the full door state.
    #[must_use]
    pub fn state(&self) -> DoorState {
        self.shared.lock().state.clone()
    }

    /// Last commanded position.
    #[must_use]
    pub fn target_state(&self) -> DoorPosition {
        self.shared.lock().state.target
    }

    /// Reported position.
    #[must_use]
    pub fn current_state(&self) -> DoorPosition {
        self.shared.lock().state.current
    }

    /// Services and characteristics exposed to the host.
    #[must_use]
    pub fn capabilities(&self) -> Vec<Capability> {
        garage_door_capabilities(self.name(), &self.config.information, &self.state())
    }

    /// Handle a "set target state" request.
    ///
    /// `value` is the raw characteristic value written by the host. Values
    /// that are neither open nor closed are accepted and ignored. Persistence
    /// and notification failures are logged and never fail the request.
    ///
    /// # Errors
    ///
    /// None of the current transitions fail; the `Result` is the
    /// acknowledgement handed back to the host.
    pub async fn set_target_state(
        &self,
        value: &serde_json::Value,
    ) -> Result<DoorState, GarageError> {
        let state = match DoorPosition::from_characteristic(value) {
            Some(DoorPosition::Open) => self.open().await,
            Some(DoorPosition::Closed) => self.close().await,
            None => {
                tracing::debug!(accessory = %self.name(), %value, "ignoring unknown target state");
                self.state()
            }
        };
        Ok(state)
    }

    async fn open(&self) -> DoorState {
        tracing::info!(accessory = %self.name(), "opening");
        let cancel_superseded = self.config.cancel_superseded_close;
        let state = {
            let mut door = self.shared.lock();
            door.state.open(now());
            door.epoch += 1;
            if cancel_superseded {
                door.cancel_pending_close();
            }
            self.shared.persist(&door.state);

            if let Some(delay) = self.config.auto_close() {
                tracing::info!(
                    accessory = %self.name(),
                    delay_secs = delay.as_secs_f64(),
                    "closing automatically after delay"
                );
                let handle = tokio::spawn(Arc::clone(&self.shared).auto_close(
                    delay,
                    door.epoch,
                    cancel_superseded,
                ));
                if cancel_superseded {
                    door.pending_close = Some(handle);
                }
            }
            door.state.clone()
        };

        self.notify_open();
        self.shared
            .publish(DoorEventKind::Opened, state.clone())
            .await;
        state
    }

    async fn close(&self) -> DoorState {
        tracing::info!(accessory = %self.name(), "closing");
        let state = {
            let mut door = self.shared.lock();
            door.state.close();
            door.epoch += 1;
            if self.config.cancel_superseded_close {
                door.cancel_pending_close();
            }
            self.shared.persist(&door.state);
            door.state.clone()
        };

        self.shared
            .publish(DoorEventKind::Closed, state.clone())
            .await;
        state
    }

    /// Fire the open notification in the background.
    ///
    /// The outcome is logged only; it never touches the door state and the
    /// caller does not wait for it.
    fn notify_open(&self) {
        let notifier = Arc::clone(&self.notifier);
        let id = self.shared.id.clone();
        tokio::spawn(async move {
            tracing::info!(accessory = %id, "sending open notification");
            match notifier.notify_open(&id).await {
                Ok(()) => tracing::debug!(accessory = %id, "open notification delivered"),
                Err(err) => {
                    tracing::warn!(accessory = %id, error = ?err, "open notification failed");
                }
            }
        });
    }
}

impl<S, P> Shared<S, P>
where
    S: StateStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    fn lock(&self) -> MutexGuard<'_, Door> {
        self.door.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, state: &DoorState) {
        if let Err(err) = self.store.set(&self.name, state.current.to_persisted()) {
            tracing::warn!(accessory = %self.name, error = ?err, "failed to persist door state");
        }
    }

    async fn publish(&self, kind: DoorEventKind, state: DoorState) {
        let event = DoorEvent::new(self.id.as_str(), kind, state);
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(accessory = %self.name, error = ?err, "failed to publish door event");
        }
    }

    /// Close the door once `delay` has elapsed.
    ///
    /// With `only_if_current`, does nothing if another transition happened
    /// since the timer was armed.
    async fn auto_close(self: Arc<Self>, delay: Duration, epoch: u64, only_if_current: bool) {
        tokio::time::sleep(delay).await;

        let state = {
            let mut door = self.lock();
            if only_if_current && door.epoch != epoch {
                return;
            }
            door.state.close();
            door.epoch += 1;
            door.pending_close = None;
            self.persist(&door.state);
            door.state.clone()
        };

        tracing::info!(accessory = %self.name, "auto closing");
        self.publish(DoorEventKind::AutoClosed, state).await;
    }
}
