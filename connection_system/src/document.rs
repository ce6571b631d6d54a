//! Document store supervisor
//!
//! This module supervises the shared MongoDB client. The driver pools
//! internally, so one client per process is shared by every caller.

use crate::errors::ConnectionError;
use crate::status::ConnectionStatus;
use crate::supervisor::{Lifecycle, Supervisor};
use async_trait::async_trait;
use config::DocumentConfig;
use event_system::{EventKind, EventManager, StoreKind};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Supervisor for the shared MongoDB client
pub struct DocumentSupervisor {
    client: RwLock<Option<Client>>,
    lifecycle: Lifecycle,
    config: DocumentConfig,
}

impl Debug for DocumentSupervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSupervisor")
            .field("store", &self.lifecycle.store())
            .field("status", &self.lifecycle.status())
            .finish()
    }
}

impl DocumentSupervisor {
    /// Create a new supervisor; no connection is opened yet
    pub fn new(config: DocumentConfig, events: Arc<EventManager>) -> Self {
        Self {
            client: RwLock::new(None),
            lifecycle: Lifecycle::new(StoreKind::Document, events),
            config,
        }
    }

    async fn open_client(&self) -> Result<Client, mongodb::error::Error> {
        let mut options = ClientOptions::parse(self.config.url.as_str()).await?;
        options.max_pool_size = Some(self.config.max_pool_size);
        options.server_selection_timeout = Some(self.config.server_selection_timeout());

        let client = Client::with_options(options)?;

        // The driver connects lazily; the ping forces the first round
        // trip so a bad endpoint fails here instead of mid-request.
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(client)
    }

    /// Get the shared client, establishing it lazily if needed
    ///
    /// Refused once the supervisor is closed; only an explicit connect
    /// call reopens.
    pub async fn handle(&self) -> Result<Client, ConnectionError> {
        {
            let slot = self.client.read().await;
            if let Some(client) = slot.as_ref() {
                return Ok(client.clone());
            }
        }

        self.establish(false).await?;

        let slot = self.client.read().await;
        slot.as_ref()
            .cloned()
            .ok_or(ConnectionError::NotReady(self.lifecycle.status()))
    }

    /// Fill the client slot, holding the write lock for the whole
    /// attempt
    ///
    /// `reopen` lets an explicit connect call bring a closed supervisor
    /// back; lazy acquisition may not, and the check runs under the
    /// same lock the drain takes so a race cannot slip past it.
    async fn establish(&self, reopen: bool) -> Result<(), ConnectionError> {
        let mut slot = self.client.write().await;
        if slot.is_some() && self.lifecycle.status().is_ready() {
            tracing::debug!("document store already connected");
            return Ok(());
        }
        if !reopen && self.lifecycle.status() == ConnectionStatus::Closed {
            return Err(ConnectionError::Closed);
        }

        let announce = self.lifecycle.connect_event();
        self.lifecycle
            .transition(ConnectionStatus::Connecting, announce);

        match self.open_client().await {
            Ok(client) => {
                *slot = Some(client);
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
}

#[async_trait]
impl Supervisor for DocumentSupervisor {
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

        let mut slot = self.client.write().await;
        if let Some(client) = slot.take() {
            client.shutdown().await;
        }
        self.lifecycle
            .transition(ConnectionStatus::Closed, EventKind::Disconnected);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let client = match self.handle().await {
            Ok(client) => client,
            Err(error) => {
                tracing::debug!(error = %error, "document health check failed");
                return false;
            }
        };

        match client.database("admin").run_command(doc! { "ping": 1 }).await {
            Ok(_) => true,
            Err(error) => {
                // A failed round trip on a held client means the
                // transport died underneath it.
                self.lifecycle.fail(&error);
                false
            }
        }
    }
}
