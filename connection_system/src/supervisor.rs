//! Supervisor contract and shared lifecycle tracking
//!
//! This module defines the `Supervisor` trait implemented by every
//! store supervisor, plus the lifecycle state machine they share.

use crate::errors::ConnectionError;
use crate::status::ConnectionStatus;
use async_trait::async_trait;
use event_system::{ConnectionEvent, EventKind, EventManager, StoreKind};
use std::sync::{Arc, RwLock};

/// Common contract for store connection supervisors
///
/// Implementations own exactly one live handle to their backing store
/// and keep the status machine in sync with it. All methods take
/// `&self`; supervisors are shared behind `Arc`.
#[async_trait]
pub trait Supervisor: Send + Sync {
    /// Store this supervisor owns the connection to
    fn store(&self) -> StoreKind;

    /// Current lifecycle status
    fn status(&self) -> ConnectionStatus;

    /// Whether the connection is established and usable
    fn is_ready(&self) -> bool;

    /// Text of the most recent connection failure, if any
    fn last_error(&self) -> Option<String>;

    /// Establish the connection, or verify the existing one
    async fn connect(&self) -> Result<(), ConnectionError>;

    /// Shut the connection down deliberately
    ///
    /// Safe to call in any state; calling it twice is a no-op.
    async fn disconnect(&self) -> Result<(), ConnectionError>;

    /// Check the connection with a trivial round trip
    ///
    /// Returns `false` on any failure instead of an error, so callers
    /// can poll it without their own error handling. A failed round
    /// trip against a held connection also degrades the status.
    async fn health_check(&self) -> bool;
}

/// Lifecycle state shared by the supervisor implementations
///
/// Tracks status and last error behind sync locks so the trait's
/// non-async accessors stay cheap, and emits a lifecycle event on
/// every transition.
pub(crate) struct Lifecycle {
    store: StoreKind,
    status: RwLock<ConnectionStatus>,
    last_error: RwLock<Option<String>>,
    events: Arc<EventManager>,
}

impl Lifecycle {
    pub(crate) fn new(store: StoreKind, events: Arc<EventManager>) -> Self {
        Self {
            store,
            status: RwLock::new(ConnectionStatus::Uninitialized),
            last_error: RwLock::new(None),
            events,
        }
    }

    pub(crate) fn store(&self) -> StoreKind {
        self.store
    }

    pub(crate) fn status(&self) -> ConnectionStatus {
        self.status
            .read()
            .map(|status| *status)
            .unwrap_or(ConnectionStatus::Degraded)
    }

    pub(crate) fn last_error(&self) -> Option<String> {
        self.last_error.read().ok().and_then(|error| error.clone())
    }

    /// Event kind a connect call should announce from the current state
    pub(crate) fn connect_event(&self) -> EventKind {
        if self.status().is_reconnect() {
            EventKind::Reconnecting
        } else {
            EventKind::Connecting
        }
    }

    /// Move to `status` and emit the matching lifecycle event
    pub(crate) fn transition(&self, status: ConnectionStatus, kind: EventKind) {
        if let Ok(mut current) = self.status.write() {
            *current = status;
        }
        self.events.emit(ConnectionEvent::new(self.store, kind));
    }

    /// Record a failure: degrade, remember the error text, emit an error event
    pub(crate) fn fail(&self, error: &impl std::fmt::Display) {
        let detail = error.to_string();
        if let Ok(mut current) = self.status.write() {
            *current = ConnectionStatus::Degraded;
        }
        if let Ok(mut last) = self.last_error.write() {
            *last = Some(detail.clone());
        }
        self.events
            .emit(ConnectionEvent::new(self.store, EventKind::Error).with_detail(detail));
    }
}
