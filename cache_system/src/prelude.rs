//! Convenience re-exports for common cache-system usage

// Core cache system components
pub use crate::errors::{CacheError, PubSubError};
pub use crate::manager::CacheManager;
pub use crate::pubsub::{PubSub, Subscription};
pub use crate::rate_limit::RateLimiter;
pub use crate::session::SessionStore;

// Re-export centralized config
pub use config::CacheConfig;

// Supervisor the facades run over
pub use connection_system::KvSupervisor;

// Common external dependencies
pub use redis;
pub use serde::{Deserialize, Serialize};
pub use serde_json;
pub use tokio;
