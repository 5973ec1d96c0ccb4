//! Event bus port — publish/subscribe for door events.

use std::future::Future;

use garagehub_domain::error::GarageError;
use garagehub_domain::event::DoorEvent;

/// Publishes door events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: DoorEvent) -> impl Future<Output = Result<(), GarageError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: DoorEvent) -> impl Future<Output = Result<(), GarageError>> + Send {
        (**self).publish(event)
    }
}
