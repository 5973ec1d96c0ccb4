//! # garagehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Deliver the host's "read/write target state" requests to accessories
//!   through the [`Bridge`](garagehub_app::bridge::Bridge)
//! - Translate the accessory acknowledgement into an HTTP response
//! - Expose accessory capabilities as JSON
//! - Stream door events (including auto-close) over Server-Sent Events
//!
//! ## Routes
//!
//! | Method | Path | Behaviour |
//! |--------|------|-----------|
//! | `GET` | `/health` | liveness probe |
//! | `GET` | `/api/accessories` | list accessories with their door state |
//! | `GET` | `/api/accessories/{id}` | accessory detail and capabilities |
//! | `GET` | `/api/accessories/{id}/target` | target door state |
//! | `PUT` | `/api/accessories/{id}/target` | set target door state |
//! | `GET` | `/api/events/stream` | SSE stream of door events |
//!
//! ## Dependency rule
//! Depends on `garagehub-app` and `garagehub-domain`. Never leaks axum
//! types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
