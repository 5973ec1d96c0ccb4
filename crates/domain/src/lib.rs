//! # garagehub-domain
//!
//! Pure domain model for the garagehub virtual garage door.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **door** (`DoorPosition`, `DoorState`) and its transitions
//! - Define the **accessory** configuration (name, auto-close delay, notify target)
//! - Define the **capabilities** an accessory exposes to its host
//!   (services and characteristics in HomeKit vocabulary)
//! - Define **events** emitted when the door changes position
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod accessory;
pub mod capability;
pub mod door;
pub mod event;
