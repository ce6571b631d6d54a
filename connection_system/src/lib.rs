//! Connection supervision for backing stores
//!
//! This crate owns the shared connection handles for the key-value,
//! document, and relational stores. Each store gets one supervisor
//! that creates its handle lazily, tracks lifecycle status, and
//! reports transitions through the event system.

pub mod document;
pub mod errors;
pub mod kv;
pub mod prelude;
pub mod relational;
pub mod status;
pub mod supervisor;

// Re-export centralized config
pub use config::{DocumentConfig, KvConfig, RelationalConfig};

pub use document::DocumentSupervisor;
pub use errors::ConnectionError;
pub use kv::KvSupervisor;
pub use relational::{RelationalSupervisor, RelationalTransaction};
pub use status::ConnectionStatus;
pub use supervisor::Supervisor;
