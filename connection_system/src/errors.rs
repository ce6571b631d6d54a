//! Error types for connection supervision
//!
//! This module defines all error types that can occur while
//! establishing, using, or shutting down store connections.

use crate::status::ConnectionStatus;
use thiserror::Error;

/// Connection system errors
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Key-value store error: {0}")]
    KeyValue(#[from] redis::RedisError),

    #[error("Document store error: {0}")]
    Document(#[from] mongodb::error::Error),

    #[error("Relational store error: {0}")]
    Relational(#[from] sqlx::Error),

    #[error("Connection has been closed")]
    Closed,

    #[error("Connection is not ready (status: {0})")]
    NotReady(ConnectionStatus),
}
