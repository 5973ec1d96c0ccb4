//! # garagehub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StateStore` — synchronous key/value persistence of the door position
//!   - `OpenNotifier` — outbound notification fired on every open
//!   - `EventPublisher` — publish door transitions to subscribers
//! - Define **driving/inbound** use-cases:
//!   - `DoorAccessory` — the door state machine (get/set target state,
//!     capabilities, auto-close)
//!   - `Bridge` — hosts several accessories and routes requests by id
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `garagehub-domain` only (plus `tokio` for tasks, timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod accessory;
pub mod bridge;
pub mod event_bus;
pub mod ports;

#[cfg(test)]
pub(crate) mod fakes;
