//! Convenience re-exports for common event-system usage

// Core event system components
pub use crate::event::{ConnectionEvent, EventKind, StoreKind};
pub use crate::manager::{EventCallback, EventManager};

// Common external dependencies
pub use serde::{Deserialize, Serialize};
pub use tracing;
