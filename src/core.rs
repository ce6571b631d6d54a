//! Core Wirehaus functionality
//!
//! This module contains the main Wirehaus connection registry,
//! constructed once by the process entry point and handed to the
//! components that need store access.

use std::sync::Arc;

use cache_system::{CacheManager, PubSub, RateLimiter, SessionStore};
use config::AppConfig;
use connection_system::{DocumentSupervisor, KvSupervisor, RelationalSupervisor, Supervisor};
use event_system::EventManager;
use serde::Serialize;

use crate::errors::WirehausError;

/// Connection registry owning one supervisor per backing store
///
/// Exactly one live handle exists per store kind; the registry hands
/// facades and collaborators shared references, never fresh
/// connections. Handles themselves are created lazily on first use.
pub struct Wirehaus {
    config: AppConfig,
    events: Arc<EventManager>,
    kv: Arc<KvSupervisor>,
    document: Arc<DocumentSupervisor>,
    relational: Arc<RelationalSupervisor>,
}

impl Wirehaus {
    /// Build the registry from configuration; opens no connections
    pub fn new(config: AppConfig) -> Result<Self, WirehausError> {
        let events = Arc::new(EventManager::new());

        let kv = Arc::new(KvSupervisor::new(config.kv.clone(), events.clone())?);
        let document = Arc::new(DocumentSupervisor::new(config.document.clone(), events.clone()));
        let relational = Arc::new(RelationalSupervisor::new(
            config.relational.clone(),
            events.clone(),
        ));

        Ok(Self {
            config,
            events,
            kv,
            document,
            relational,
        })
    }

    /// Build the registry from files and environment overrides
    pub fn from_env() -> Result<Self, WirehausError> {
        Self::new(AppConfig::load()?)
    }

    /// Get current configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lifecycle event sink shared by every supervisor
    pub fn events(&self) -> &EventManager {
        &self.events
    }

    /// Key-value store supervisor
    pub fn kv(&self) -> Arc<KvSupervisor> {
        self.kv.clone()
    }

    /// Document store supervisor
    pub fn document(&self) -> Arc<DocumentSupervisor> {
        self.document.clone()
    }

    /// Relational store supervisor
    pub fn relational(&self) -> Arc<RelationalSupervisor> {
        self.relational.clone()
    }

    /// Every supervisor, in drain order
    pub fn supervisors(&self) -> Vec<Arc<dyn Supervisor>> {
        vec![
            self.document.clone(),
            self.relational.clone(),
            self.kv.clone(),
        ]
    }

    /// Cache facade over the shared key-value connection
    pub fn cache(&self) -> CacheManager {
        CacheManager::new(self.kv.clone(), self.config.cache.clone())
    }

    /// Session facade (`session:` namespace, session TTL)
    pub fn sessions(&self) -> SessionStore {
        SessionStore::new(self.cache())
    }

    /// Fixed-window rate-limit counter
    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.kv.clone(), self.config.cache.clone())
    }

    /// Publish/subscribe facade
    pub fn pubsub(&self) -> PubSub {
        PubSub::new(self.kv.clone())
    }

    /// Connect every supervisor eagerly, failing on the first error
    ///
    /// Optional; stores connect lazily on first use without it.
    pub async fn connect_all(&self) -> Result<(), WirehausError> {
        for supervisor in self.supervisors() {
            supervisor.connect().await?;
        }
        Ok(())
    }

    /// Check every store; never fails
    pub async fn health_report(&self) -> HealthReport {
        HealthReport {
            key_value: self.kv.health_check().await,
            document: self.document.health_check().await,
            relational: self.relational.health_check().await,
        }
    }
}

/// Aggregated health snapshot for an external HTTP layer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthReport {
    pub key_value: bool,
    pub document: bool,
    pub relational: bool,
}

impl HealthReport {
    pub fn all_healthy(&self) -> bool {
        self.key_value && self.document && self.relational
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Wirehaus {
        Wirehaus::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn test_supervisors_are_shared_handles() {
        let haus = registry();
        assert!(Arc::ptr_eq(&haus.kv(), &haus.kv()));
        assert!(Arc::ptr_eq(&haus.document(), &haus.document()));
        assert!(Arc::ptr_eq(&haus.relational(), &haus.relational()));
    }

    #[test]
    fn test_facades_share_one_supervisor() {
        let haus = registry();
        // Facades are cheap to construct; the supervisor behind them
        // is always the same handle.
        let _ = haus.cache();
        let _ = haus.sessions();
        let _ = haus.rate_limiter();
        let _ = haus.pubsub();
        assert!(Arc::ptr_eq(&haus.kv(), &haus.kv()));
    }

    #[test]
    fn test_registry_opens_no_connections() {
        let haus = registry();
        for supervisor in haus.supervisors() {
            assert!(!supervisor.is_ready());
        }
    }

    #[test]
    fn test_health_report_aggregates() {
        let report = HealthReport {
            key_value: true,
            document: true,
            relational: false,
        };
        assert!(!report.all_healthy());
    }
}
