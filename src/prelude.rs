//! Convenience re-exports for common Wirehaus usage
//!
//! This prelude module re-exports the most commonly used items from the
//! Wirehaus ecosystem, making it easier to import everything you need
//! with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use wirehaus::prelude::*;
//!
//! // Now you have access to the registry, facades, and supervisors
//! ```

// Core Wirehaus components
pub use crate::core::{HealthReport, Wirehaus};
pub use crate::errors::WirehausError;
pub use crate::shutdown::shutdown_signal;

// Re-export centralized config
pub use config::{
    AppConfig, CacheConfig, ConfigError, DocumentConfig, KvConfig, RelationalConfig, RuntimeMode,
};

// Re-export supervisors and their contract
pub use connection_system::prelude::*;

// Re-export the facades over the key-value store
pub use cache_system::prelude::*;

// Re-export lifecycle event types
pub use event_system::prelude::*;

// Scaffolding generator
pub use scaffold::{create_module, ScaffoldError};

// Common external dependencies
pub use anyhow;
pub use tokio;
