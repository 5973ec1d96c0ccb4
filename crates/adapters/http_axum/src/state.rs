//! Shared application state for axum handlers.

use std::sync::Arc;

use garagehub_app::bridge::Bridge;
use garagehub_app::event_bus::InProcessEventBus;

/// Bridge type served over HTTP: events always go through the in-process bus
/// so they can be streamed to clients.
pub type HttpBridge<S, N> = Bridge<S, N, Arc<InProcessEventBus>>;

/// Application state shared across all axum handlers.
///
/// Generic over the store and notifier types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<S, N> {
    /// Accessories served by this host.
    pub bridge: Arc<HttpBridge<S, N>>,
    /// Event bus the accessories publish to.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<S, N> Clone for AppState<S, N> {
    fn clone(&self) -> Self {
        Self {
            bridge: Arc::clone(&self.bridge),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<S, N> AppState<S, N> {
    /// Create a new application state.
    pub fn new(bridge: HttpBridge<S, N>, event_bus: Arc<InProcessEventBus>) -> Self {
        Self {
            bridge: Arc::new(bridge),
            event_bus,
        }
    }
}
