//! # garagehub-adapter-storage-json
//!
//! File-backed implementation of the [`StateStore`](garagehub_app::ports::StateStore)
//! port.
//!
//! ## Layout
//!
//! One file per key inside the persistence directory. The file name is the
//! hex SHA-256 digest of the key, so any accessory name maps to a valid
//! file name of fixed length. Each file holds `{"key": <key>, "value": <value>}`
//! and an entry whose key does not match is ignored.
//!
//! Unreadable or corrupt files are treated as absent, never as errors.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `garagehub-app` and `garagehub-domain`.

mod error;
mod store;

pub use error::StorageError;
pub use store::{Config, JsonFileStore};
