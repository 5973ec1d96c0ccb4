//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use garagehub_domain::error::GarageError;
use garagehub_domain::event::DoorEvent;

use crate::ports::EventPublisher;

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct InProcessEventBus {
    sender: broadcast::Sender<DoorEvent>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DoorEvent> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: DoorEvent) -> impl Future<Output = Result<(), GarageError>> + Send {
        // send only fails when nobody is subscribed
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garagehub_domain::door::{DoorPosition, DoorState};
    use garagehub_domain::event::DoorEventKind;

    fn opened(accessory: &str) -> DoorEvent {
        DoorEvent::new(
            accessory,
            DoorEventKind::Opened,
            DoorState::at(DoorPosition::Open),
        )
    }

    #[tokio::test]
    async fn should_deliver_event_to_subscriber() {
        let bus = InProcessEventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(opened("garage")).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.accessory, "garage");
        assert_eq!(received.kind, DoorEventKind::Opened);
    }

    #[tokio::test]
    async fn should_deliver_event_to_multiple_subscribers() {
        let bus = InProcessEventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(opened("garage")).await.unwrap();

        assert_eq!(rx1.recv().await.unwrap().accessory, "garage");
        assert_eq!(rx2.recv().await.unwrap().accessory, "garage");
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessEventBus::new(16);
        assert!(bus.publish(opened("garage")).await.is_ok());
    }

    #[tokio::test]
    async fn should_not_deliver_events_published_before_subscription() {
        let bus = InProcessEventBus::new(16);
        bus.publish(opened("early")).await.unwrap();

        let mut rx = bus.subscribe();
        bus.publish(opened("late")).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().accessory, "late");
    }
}
