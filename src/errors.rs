//! Error types for the Wirehaus crate
//!
//! This module contains all error types that can be returned by the
//! connection registry.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WirehausError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Connection error: {0}")]
    Connection(#[from] connection_system::ConnectionError),
}
