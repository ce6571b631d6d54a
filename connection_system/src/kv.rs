//! Key-value store supervisor
//!
//! This module supervises the shared Redis connection. The handle is
//! created lazily on first use and shared by every facade; pub/sub
//! subscribers get their own dedicated connection on request.

use crate::errors::ConnectionError;
use crate::status::ConnectionStatus;
use crate::supervisor::{Lifecycle, Supervisor};
use async_trait::async_trait;
use config::KvConfig;
use event_system::{EventKind, EventManager, StoreKind};
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::Client;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Supervisor for the shared Redis connection
pub struct KvSupervisor {
    client: Client,
    connection: RwLock<Option<ConnectionManager>>,
    lifecycle: Lifecycle,
    config: KvConfig,
}

impl Debug for KvSupervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvSupervisor")
            .field("store", &self.lifecycle.store())
            .field("status", &self.lifecycle.status())
            .finish()
    }
}

impl KvSupervisor {
    /// Create a new supervisor; no connection is opened yet
    pub fn new(config: KvConfig, events: Arc<EventManager>) -> Result<Self, ConnectionError> {
        let client = Client::open(config.url.as_str())?;

        Ok(Self {
            client,
            connection: RwLock::new(None),
            lifecycle: Lifecycle::new(StoreKind::KeyValue, events),
            config,
        })
    }

    fn manager_config(&self) -> ConnectionManagerConfig {
        ConnectionManagerConfig::new()
            .set_connection_timeout(self.config.connect_timeout())
            .set_response_timeout(self.config.command_timeout())
            .set_number_of_retries(self.config.max_retries_per_request as usize)
    }

    /// Get the shared connection, establishing it lazily if needed
    ///
    /// Refused once the supervisor is closed; a deliberate shutdown is
    /// never undone by an operation that merely wants a handle.
    pub async fn handle(&self) -> Result<ConnectionManager, ConnectionError> {
        {
            let slot = self.connection.read().await;
            if let Some(manager) = slot.as_ref() {
                return Ok(manager.clone());
            }
        }

        self.establish(false).await?;

        let slot = self.connection.read().await;
        slot.as_ref()
            .cloned()
            .ok_or(ConnectionError::NotReady(self.lifecycle.status()))
    }

    /// Fill the connection slot, holding the write lock for the whole
    /// attempt
    ///
    /// The lock serializes concurrent attempts; the second caller finds
    /// the slot filled and returns early. `reopen` lets an explicit
    /// connect call bring a closed supervisor back. Lazy acquisition
    /// may not, and because the check runs under the same lock the
    /// drain takes, a handle request racing a shutdown cannot slip
    /// past it.
    async fn establish(&self, reopen: bool) -> Result<(), ConnectionError> {
        let mut slot = self.connection.write().await;
        if slot.is_some() && self.lifecycle.status().is_ready() {
            return Ok(());
        }
        if !reopen && self.lifecycle.status() == ConnectionStatus::Closed {
            return Err(ConnectionError::Closed);
        }

        let announce = self.lifecycle.connect_event();
        self.lifecycle
            .transition(ConnectionStatus::Connecting, announce);

        match self
            .client
            .get_connection_manager_with_config(self.manager_config())
            .await
        {
            Ok(manager) => {
                *slot = Some(manager);
                self.lifecycle.transition(ConnectionStatus::Ready, EventKind::Ready);
                Ok(())
            }
            Err(error) => {
                *slot = None;
                self.lifecycle.fail(&error);
                Err(error.into())
            }
        }
    }

    /// Open a dedicated pub/sub connection
    ///
    /// Subscribers cannot share the command connection, so each call
    /// returns a fresh one owned by the caller.
    pub async fn subscriber(&self) -> Result<redis::aio::PubSub, ConnectionError> {
        if self.lifecycle.status() == ConnectionStatus::Closed {
            return Err(ConnectionError::Closed);
        }

        let pubsub = self.client.get_async_pubsub().await?;
        Ok(pubsub)
    }
}

#[async_trait]
impl Supervisor for KvSupervisor {
    fn store(&self) -> StoreKind {
        self.lifecycle.store()
    }

    fn status(&self) -> ConnectionStatus {
        self.lifecycle.status()
    }

    fn is_ready(&self) -> bool {
        self.lifecycle.status().is_ready()
    }

    fn last_error(&self) -> Option<String> {
        self.lifecycle.last_error()
    }

    async fn connect(&self) -> Result<(), ConnectionError> {
        self.establish(true).await
    }

    async fn disconnect(&self) -> Result<(), ConnectionError> {
        if self.lifecycle.status() == ConnectionStatus::Closed {
            return Ok(());
        }

        let mut slot = self.connection.write().await;
        // Dropping the last clone stops the manager's reconnect driver.
        *slot = None;
        self.lifecycle
            .transition(ConnectionStatus::Closed, EventKind::Disconnected);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = match self.handle().await {
            Ok(conn) => conn,
            Err(error) => {
                tracing::debug!(error = %error, "key-value health check failed");
                return false;
            }
        };

        let pong: Result<String, redis::RedisError> =
            redis::cmd("PING").query_async(&mut conn).await;
        match pong {
            Ok(reply) => reply == "PONG",
            Err(error) => {
                // The manager has no drop hook, so a failed round trip
                // is where a dead transport first shows; record it so
                // the status stops reporting Ready.
                self.lifecycle.fail(&error);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_system::ConnectionEvent;
    use std::sync::Mutex;

    fn refused_config() -> KvConfig {
        // Port 1 is never bound; connection attempts fail immediately.
        KvConfig::new("redis://127.0.0.1:1".to_string(), 200, 200, 0)
    }

    fn recording_events() -> (Arc<EventManager>, Arc<Mutex<Vec<EventKind>>>) {
        let events = Arc::new(EventManager::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        events.add_callback(move |event: &ConnectionEvent| {
            if let Ok(mut kinds) = sink.lock() {
                kinds.push(event.kind);
            }
        });
        (events, seen)
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = KvConfig::new("not a url".to_string(), 200, 200, 0);
        let result = KvSupervisor::new(config, Arc::new(EventManager::new()));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_starts_uninitialized() {
        let supervisor =
            KvSupervisor::new(KvConfig::default(), Arc::new(EventManager::new())).unwrap();
        assert_eq!(supervisor.store(), StoreKind::KeyValue);
        assert_eq!(supervisor.status(), ConnectionStatus::Uninitialized);
        assert!(!supervisor.is_ready());
        assert_eq!(supervisor.last_error(), None);
    }

    #[tokio::test]
    async fn test_connect_refused_degrades() {
        let (events, seen) = recording_events();
        let supervisor = KvSupervisor::new(refused_config(), events).unwrap();

        let result = supervisor.connect().await;
        assert!(result.is_err());
        assert_eq!(supervisor.status(), ConnectionStatus::Degraded);
        assert!(supervisor.last_error().is_some());

        let kinds = seen.lock().unwrap().clone();
        assert_eq!(kinds, vec![EventKind::Connecting, EventKind::Error]);
    }

    #[tokio::test]
    async fn test_reconnect_announced_after_failure() {
        let (events, seen) = recording_events();
        let supervisor = KvSupervisor::new(refused_config(), events).unwrap();

        let _ = supervisor.connect().await;
        let _ = supervisor.connect().await;

        let kinds = seen.lock().unwrap().clone();
        assert_eq!(
            kinds,
            vec![
                EventKind::Connecting,
                EventKind::Error,
                EventKind::Reconnecting,
                EventKind::Error,
            ]
        );
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let supervisor =
            KvSupervisor::new(KvConfig::default(), Arc::new(EventManager::new())).unwrap();

        assert!(supervisor.disconnect().await.is_ok());
        assert_eq!(supervisor.status(), ConnectionStatus::Closed);
        assert!(supervisor.disconnect().await.is_ok());
        assert_eq!(supervisor.status(), ConnectionStatus::Closed);
    }

    #[tokio::test]
    async fn test_handle_refused_after_close() {
        let supervisor =
            KvSupervisor::new(KvConfig::default(), Arc::new(EventManager::new())).unwrap();
        supervisor.disconnect().await.unwrap();

        let result = supervisor.handle().await;
        assert!(matches!(result, Err(ConnectionError::Closed)));
    }

    #[tokio::test]
    async fn test_racing_handle_cannot_reopen_closed() {
        for _ in 0..16 {
            let supervisor = Arc::new(
                KvSupervisor::new(refused_config(), Arc::new(EventManager::new())).unwrap(),
            );

            let racer = {
                let supervisor = supervisor.clone();
                tokio::spawn(async move {
                    let _ = supervisor.handle().await;
                })
            };
            supervisor.disconnect().await.unwrap();
            racer.await.unwrap();

            // Whatever the interleaving, the close sticks until an
            // explicit connect call.
            assert_eq!(supervisor.status(), ConnectionStatus::Closed);
            assert!(matches!(
                supervisor.handle().await,
                Err(ConnectionError::Closed)
            ));
        }
    }

    #[tokio::test]
    async fn test_health_check_false_without_backend() {
        let supervisor =
            KvSupervisor::new(refused_config(), Arc::new(EventManager::new())).unwrap();
        assert!(!supervisor.health_check().await);
    }

    #[tokio::test]
    async fn test_failed_health_check_degrades_status() {
        // A listener that accepts and then stays silent: connecting
        // succeeds, but every command times out.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut sockets = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                sockets.push(socket);
            }
        });

        let config = KvConfig::new(format!("redis://{addr}"), 200, 200, 0);
        let supervisor = KvSupervisor::new(config, Arc::new(EventManager::new())).unwrap();

        supervisor.connect().await.unwrap();
        assert!(supervisor.is_ready());

        assert!(!supervisor.health_check().await);
        assert_eq!(supervisor.status(), ConnectionStatus::Degraded);
        assert!(!supervisor.is_ready());
        assert!(supervisor.last_error().is_some());
    }
}
