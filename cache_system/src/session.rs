//! Session store facade
//!
//! Thin wrapper over the cache manager that namespaces keys with a
//! `session:` prefix and applies the longer session TTL.

use crate::errors::CacheError;
use crate::manager::CacheManager;
use serde::{Deserialize, Serialize};

const SESSION_PREFIX: &str = "session:";

/// Session facade over the cache manager
///
/// Holds no state of its own beyond the configured TTL; every call
/// delegates to the cache with a prefixed key.
#[derive(Clone, Debug)]
pub struct SessionStore {
    cache: CacheManager,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Create a session store; TTL comes from the shared cache config
    pub fn new(cache: CacheManager) -> Self {
        let ttl_seconds = cache.config().session_ttl_seconds;
        Self { cache, ttl_seconds }
    }

    fn session_key(session_id: &str) -> String {
        format!("{}{}", SESSION_PREFIX, session_id)
    }

    /// Store session data under `session:{id}` with the session TTL
    pub async fn set<T>(&self, session_id: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        self.cache
            .set_with_ttl(&Self::session_key(session_id), value, self.ttl_seconds)
            .await
    }

    /// Store session data with a custom TTL
    pub async fn set_with_ttl<T>(
        &self,
        session_id: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        self.cache
            .set_with_ttl(&Self::session_key(session_id), value, ttl_seconds)
            .await
    }

    /// Fetch session data, or `None` when absent or undecodable
    pub async fn get<T>(&self, session_id: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.cache.get(&Self::session_key(session_id)).await
    }

    /// Remove a session; true iff it existed
    pub async fn delete(&self, session_id: &str) -> bool {
        self.cache.delete(&Self::session_key(session_id)).await
    }

    /// TTL applied to session writes
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}
