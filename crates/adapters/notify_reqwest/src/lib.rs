//! # garagehub-adapter-notify-reqwest
//!
//! Implements the [`OpenNotifier`](garagehub_app::ports::OpenNotifier) port
//! with [reqwest](https://docs.rs/reqwest): every open sends
//! `POST <url>` with HTTP Basic credentials and an empty body.
//!
//! No retry. A non-2xx response counts as a failure; callers only log it.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `garagehub-app` and `garagehub-domain`.

mod config;
mod error;
mod notifier;

pub use config::NotifyConfig;
pub use error::NotifyError;
pub use notifier::HttpNotifier;
