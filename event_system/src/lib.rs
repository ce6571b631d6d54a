//! Event system for connection lifecycle handling
//!
//! This crate provides lifecycle event types and callback dispatch
//! for the connection supervisors in the Wirehaus ecosystem.

pub mod event;
pub mod manager;
pub mod prelude;

pub use event::{ConnectionEvent, EventKind, StoreKind};
pub use manager::{EventCallback, EventManager};
