//! Cache manager implementation
//!
//! This module provides the main CacheManager struct for key/value
//! caching over the supervised Redis connection. Values are stored as
//! JSON text with an explicit expiry on every write.

use crate::errors::CacheError;
use config::CacheConfig;
use connection_system::KvSupervisor;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// Redis-backed cache facade
///
/// Writes surface errors to the caller; reads and deletes swallow
/// failures and return a miss-shaped default, because a degraded cache
/// must never break the caller.
#[derive(Clone)]
pub struct CacheManager {
    supervisor: Arc<KvSupervisor>,
    config: Arc<CacheConfig>,
}

impl Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("config", &self.config)
            .field("supervisor", &self.supervisor)
            .finish()
    }
}

impl CacheManager {
    /// Create a new cache manager over the supervised connection
    pub fn new(supervisor: Arc<KvSupervisor>, config: CacheConfig) -> Self {
        Self {
            supervisor,
            config: Arc::new(config),
        }
    }

    /// Set a value with the configured default TTL
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        self.set_with_ttl(key, value, self.config.default_ttl_seconds)
            .await
    }

    /// Set a value with a custom TTL
    ///
    /// Every write carries an expiry; unbounded keys are not allowed
    /// through this facade.
    pub async fn set_with_ttl<T>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json_str = serde_json::to_string(value)?;
        let mut conn = self.supervisor.handle().await?;

        let _: () = conn.set_ex(key, &json_str, ttl_seconds).await?;
        Ok(())
    }

    /// Get a value, or `None` on a miss
    ///
    /// Undecodable stored data and transport failures are both treated
    /// as misses; this call never reports an error.
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        match self.try_get(key).await {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key, error = %error, "cache read failed");
                None
            }
        }
    }

    async fn try_get<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.supervisor.handle().await?;
        let cached_data: Option<String> = conn.get(key).await?;

        match cached_data {
            Some(json_str) => match serde_json::from_str(&json_str) {
                Ok(value) => Ok(Some(value)),
                Err(error) => {
                    tracing::warn!(key, error = %error, "undecodable cache entry treated as miss");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Delete a key; true iff the key existed
    ///
    /// Failures are logged and reported as `false`.
    pub async fn delete(&self, key: &str) -> bool {
        match self.try_delete(key).await {
            Ok(deleted) => deleted,
            Err(error) => {
                tracing::warn!(key, error = %error, "cache delete failed");
                false
            }
        }
    }

    async fn try_delete(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.supervisor.handle().await?;
        let deleted: i32 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    /// Delete every key matching `pattern`; returns the count deleted
    ///
    /// Failures are logged and reported as `0`.
    pub async fn delete_by_pattern(&self, pattern: &str) -> u64 {
        match self.try_delete_by_pattern(pattern).await {
            Ok(deleted) => deleted,
            Err(error) => {
                tracing::warn!(pattern, error = %error, "cache pattern delete failed");
                0
            }
        }
    }

    async fn try_delete_by_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let mut conn = self.supervisor.handle().await?;

        let keys: Vec<String> = conn.keys(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        let deleted: u64 = conn.del(keys).await?;
        Ok(deleted)
    }

    /// Get current configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}
