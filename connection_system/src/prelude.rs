//! Convenience re-exports for common connection-system usage

// Core connection system components
pub use crate::document::DocumentSupervisor;
pub use crate::errors::ConnectionError;
pub use crate::kv::KvSupervisor;
pub use crate::relational::{RelationalSupervisor, RelationalTransaction};
pub use crate::status::ConnectionStatus;
pub use crate::supervisor::Supervisor;

// Re-export centralized config
pub use config::{DocumentConfig, KvConfig, RelationalConfig};

// Lifecycle event types supervisors emit
pub use event_system::{ConnectionEvent, EventKind, EventManager, StoreKind};

// Common external dependencies
pub use async_trait::async_trait;
pub use mongodb;
pub use redis;
pub use sqlx;
pub use tokio;
