//! # Wirehaus
//!
//! Supervised store connections for service scaffolds: one lazily-created
//! handle per backing store (key-value, document, relational), with caching,
//! sessions, rate limiting, and pub/sub layered on the key-value store, and
//! graceful drain of every connection on shutdown.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wirehaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let haus = Wirehaus::new(config)?;
//!
//!     haus.events().add_callback(|event| {
//!         println!("[{}] {}", event.store, event.kind);
//!     });
//!
//!     let cache = haus.cache();
//!     cache.set("greeting", &"hello").await?;
//!     let greeting: Option<String> = cache.get("greeting").await;
//!     println!("cached: {:?}", greeting);
//!
//!     let limiter = haus.rate_limiter();
//!     let hits = limiter.increment_with_ttl("rate:login:10.0.0.1", 60).await;
//!     println!("hits this window: {}", hits);
//!
//!     // Blocks until SIGINT/SIGTERM, then drains every connection.
//!     haus.run_until_shutdown().await;
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;
pub mod shutdown;

// Re-export the main public types for convenience
pub use crate::core::{HealthReport, Wirehaus};
pub use errors::WirehausError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, DocumentConfig, KvConfig, RelationalConfig, RuntimeMode};

// Re-export member crates for direct access to their full surface
pub use cache_system;
pub use config;
pub use connection_system;
pub use event_system;
pub use scaffold;

// Re-export external dependencies used in public API
pub use redis;
pub use tokio;
