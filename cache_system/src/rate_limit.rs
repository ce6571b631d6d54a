//! Fixed-window rate-limit counter
//!
//! Increment and expiry are issued as one atomic unit so a counter is
//! never left without an expiry under concurrent callers. The window
//! resets from the most recent increment, not the first.

use crate::errors::CacheError;
use config::CacheConfig;
use connection_system::KvSupervisor;
use std::sync::Arc;

/// Atomic increment-and-expire counter over the supervised connection
#[derive(Clone, Debug)]
pub struct RateLimiter {
    supervisor: Arc<KvSupervisor>,
    config: Arc<CacheConfig>,
}

impl RateLimiter {
    pub fn new(supervisor: Arc<KvSupervisor>, config: CacheConfig) -> Self {
        Self {
            supervisor,
            config: Arc::new(config),
        }
    }

    /// Increment the counter with the default window
    pub async fn increment(&self, key: &str) -> u64 {
        self.increment_with_ttl(key, self.config.default_ttl_seconds)
            .await
    }

    /// Increment the counter, resetting its expiry to `ttl_seconds`
    ///
    /// Returns the post-increment count, or `0` on any failure so an
    /// unreachable store never blocks the caller.
    pub async fn increment_with_ttl(&self, key: &str, ttl_seconds: u64) -> u64 {
        match self.try_increment(key, ttl_seconds).await {
            Ok(count) => count,
            Err(error) => {
                tracing::warn!(key, error = %error, "rate limit increment failed");
                0
            }
        }
    }

    async fn try_increment(&self, key: &str, ttl_seconds: u64) -> Result<u64, CacheError> {
        let mut conn = self.supervisor.handle().await?;

        // MULTI/EXEC so the increment and its expiry land together.
        let (count,): (i64,) = redis::pipe()
            .atomic()
            .incr(key, 1)
            .expire(key, ttl_seconds as i64)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(count.max(0) as u64)
    }
}
