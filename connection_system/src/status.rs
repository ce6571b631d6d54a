//! Connection status definitions
//!
//! This module contains the lifecycle states shared by every
//! store supervisor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a supervised store connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// No connection has been requested yet
    Uninitialized,
    /// A connection attempt is in flight
    Connecting,
    /// The handle is established and usable
    Ready,
    /// The last connection attempt or operation failed
    Degraded,
    /// The connection was shut down deliberately
    Closed,
}

impl ConnectionStatus {
    /// Whether the connection is usable for operations
    pub fn is_ready(&self) -> bool {
        matches!(self, ConnectionStatus::Ready)
    }

    /// Whether a connect call from this state is a reconnect
    pub fn is_reconnect(&self) -> bool {
        matches!(self, ConnectionStatus::Degraded | ConnectionStatus::Closed)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionStatus::Uninitialized => "uninitialized",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Ready => "ready",
            ConnectionStatus::Degraded => "degraded",
            ConnectionStatus::Closed => "closed",
        };
        write!(f, "{}", label)
    }
}
