//! Connection lifecycle event types and definitions
//!
//! This module defines the structure of connection lifecycle events
//! that flow from the supervisors to the observability sink.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backing store kind a supervisor owns the connection to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    KeyValue,
    Document,
    Relational,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::KeyValue => write!(f, "key-value"),
            StoreKind::Document => write!(f, "document"),
            StoreKind::Relational => write!(f, "relational"),
        }
    }
}

/// Lifecycle event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Connecting,
    Ready,
    Reconnecting,
    Error,
    Disconnected,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Connecting => write!(f, "connecting"),
            EventKind::Ready => write!(f, "ready"),
            EventKind::Reconnecting => write!(f, "reconnecting"),
            EventKind::Error => write!(f, "error"),
            EventKind::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Connection lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionEvent {
    /// Store the supervisor manages
    pub store: StoreKind,
    /// What happened
    pub kind: EventKind,
    /// Optional detail, usually the error text for `EventKind::Error`
    pub detail: Option<String>,
    /// Event timestamp (UTC)
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ConnectionEvent {
    pub fn new(store: StoreKind, kind: EventKind) -> Self {
        Self {
            store,
            kind,
            detail: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// True for events reporting a failure
    pub fn is_error(&self) -> bool {
        self.kind == EventKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let event = ConnectionEvent::new(StoreKind::KeyValue, EventKind::Error)
            .with_detail("connection refused");
        assert_eq!(event.store, StoreKind::KeyValue);
        assert_eq!(event.kind, EventKind::Error);
        assert_eq!(event.detail.as_deref(), Some("connection refused"));
        assert!(event.is_error());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(StoreKind::KeyValue.to_string(), "key-value");
        assert_eq!(StoreKind::Document.to_string(), "document");
        assert_eq!(StoreKind::Relational.to_string(), "relational");
        assert_eq!(EventKind::Reconnecting.to_string(), "reconnecting");
    }
}
