//! Notifier port — tells an external system that a door was opened.

use std::future::Future;

use garagehub_domain::error::GarageError;

/// Sends the outbound "door opened" notification.
///
/// Callers treat it as fire-and-forget: the result is only logged and never
/// influences the door state.
pub trait OpenNotifier {
    /// Notify that the accessory identified by `accessory` was opened.
    fn notify_open(&self, accessory: &str)
    -> impl Future<Output = Result<(), GarageError>> + Send;
}

impl<T: OpenNotifier + Send + Sync> OpenNotifier for std::sync::Arc<T> {
    fn notify_open(
        &self,
        accessory: &str,
    ) -> impl Future<Output = Result<(), GarageError>> + Send {
        (**self).notify_open(accessory)
    }
}
