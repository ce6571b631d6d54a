use crate::event::{ConnectionEvent, EventKind};

/// Event callback invoked for every lifecycle event
pub type EventCallback = Box<dyn Fn(&ConnectionEvent) + Send + Sync>;

/// Event manager for connection lifecycle notifications
///
/// Every event is written to the tracing sink as one log line and then handed to
/// each registered callback. Emission never reports a failure back to the
/// supervisor that raised the event.
pub struct EventManager {
    callbacks: std::sync::RwLock<Vec<EventCallback>>,
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

impl EventManager {
    pub fn new() -> Self {
        Self {
            callbacks: std::sync::RwLock::new(Vec::new()),
        }
    }

    /// Add event callback
    pub fn add_callback<F>(&self, callback: F)
    where
        F: Fn(&ConnectionEvent) + Send + Sync + 'static,
    {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.push(Box::new(callback));
        }
    }

    /// Emit event to the log sink and all subscribers
    pub fn emit(&self, event: ConnectionEvent) {
        match event.kind {
            EventKind::Error => tracing::error!(
                store = %event.store,
                detail = event.detail.as_deref().unwrap_or(""),
                "connection error"
            ),
            kind => tracing::info!(
                store = %event.store,
                detail = event.detail.as_deref().unwrap_or(""),
                "connection {kind}"
            ),
        }

        if let Ok(callbacks) = self.callbacks.read() {
            for callback in callbacks.iter() {
                callback(&event);
            }
        }
    }

    /// Clear all callbacks
    pub fn clear_callbacks(&self) {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.clear();
        }
    }

    /// Get number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().map(|c| c.len()).unwrap_or(0)
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::StoreKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_callbacks_receive_every_event() {
        let manager = EventManager::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = seen.clone();
        manager.add_callback(move |event| {
            assert_eq!(event.store, StoreKind::KeyValue);
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(manager.callback_count(), 1);

        manager.emit(ConnectionEvent::new(StoreKind::KeyValue, EventKind::Connecting));
        manager.emit(ConnectionEvent::new(StoreKind::KeyValue, EventKind::Ready));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clear_callbacks() {
        let manager = EventManager::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = seen.clone();
        manager.add_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        manager.clear_callbacks();
        assert_eq!(manager.callback_count(), 0);

        manager.emit(ConnectionEvent::new(StoreKind::Document, EventKind::Ready));
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_emit_without_callbacks_is_silent() {
        let manager = EventManager::new();
        manager.emit(
            ConnectionEvent::new(StoreKind::Relational, EventKind::Error).with_detail("boom"),
        );
    }
}
