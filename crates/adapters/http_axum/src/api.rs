//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod accessories;
pub mod sse;

use axum::Router;
use axum::routing::get;

use garagehub_app::ports::{OpenNotifier, StateStore};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, N>() -> Router<AppState<S, N>>
where
    S: StateStore + Send + Sync + 'static,
    N: OpenNotifier + Send + Sync + 'static,
{
    Router::new()
        .route("/accessories", get(accessories::list::<S, N>))
        .route("/accessories/{id}", get(accessories::get::<S, N>))
        .route(
            "/accessories/{id}/target",
            get(accessories::get_target::<S, N>).put(accessories::set_target::<S, N>),
        )
        .route("/events/stream", get(sse::stream::<S, N>))
}
