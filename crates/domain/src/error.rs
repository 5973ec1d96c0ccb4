//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`GarageError`]
//! via `From` when crossing a port boundary.

/// Base error for every garagehub layer.
#[derive(Debug, thiserror::Error)]
pub enum GarageError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested resource does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The outbound open notification failed.
    #[error("notification error")]
    Notification(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations detected by domain types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An accessory name is empty or only whitespace.
    #[error("name must not be empty")]
    EmptyName,

    /// Two accessories resolve to the same identifier.
    #[error("duplicate accessory id {0:?}")]
    DuplicateAccessory(String),

    /// The notification URL is empty.
    #[error("notification url must not be empty")]
    EmptyNotifyUrl,
}

/// A lookup that did not match anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id:?} not found")]
pub struct NotFoundError {
    /// Kind of the missing resource (e.g. `"Accessory"`).
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}
