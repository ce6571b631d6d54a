//! Cache system over the supervised key-value store
//!
//! This crate provides the caller-facing facades built on the shared
//! Redis connection: JSON caching with TTLs, namespaced sessions,
//! fixed-window rate limiting, and publish/subscribe.

pub mod errors;
pub mod manager;
pub mod prelude;
pub mod pubsub;
pub mod rate_limit;
pub mod session;

// Re-export centralized config
pub use config::CacheConfig;

pub use errors::{CacheError, PubSubError};
pub use manager::CacheManager;
pub use pubsub::{PubSub, Subscription};
pub use rate_limit::RateLimiter;
pub use session::SessionStore;
