//! Error types for cache, session, rate-limit, and pub/sub operations
//!
//! Only write-shaped operations surface these errors; read-shaped
//! operations log the failure and return a safe default instead.

use thiserror::Error;

/// Cache system errors
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Connection error: {0}")]
    Connection(#[from] connection_system::ConnectionError),

    #[error("Store operation error: {0}")]
    Operation(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Publish/subscribe errors
///
/// Kept separate from `CacheError` so callers can tell a failed
/// publish from a failed subscription setup.
#[derive(Error, Debug)]
pub enum PubSubError {
    #[error("Connection error: {0}")]
    Connection(#[from] connection_system::ConnectionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Publish failed: {0}")]
    Publish(redis::RedisError),

    #[error("Subscribe failed: {0}")]
    Subscribe(redis::RedisError),
}
