//! Publish/subscribe facade
//!
//! Publishing uses the shared command connection; each subscription
//! gets a dedicated connection because a subscribed connection cannot
//! issue ordinary commands. There is no unsubscribe and no automatic
//! resubscribe: a dropped subscriber connection stops delivering until
//! the caller subscribes again.

use crate::errors::PubSubError;
use connection_system::KvSupervisor;
use futures::StreamExt;
use redis::AsyncCommands;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle to an active subscription
///
/// Dropping the handle leaves the listener running for the life of the
/// process; call [`Subscription::close`] to stop delivery.
#[derive(Debug)]
pub struct Subscription {
    channel: String,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Channel this subscription listens on
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Whether the listener task is still running
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the listener and close its dedicated connection
    pub fn close(self) {
        self.task.abort();
    }
}

/// Publish/subscribe facade over the supervised connection
#[derive(Clone, Debug)]
pub struct PubSub {
    supervisor: Arc<KvSupervisor>,
}

impl PubSub {
    pub fn new(supervisor: Arc<KvSupervisor>) -> Self {
        Self { supervisor }
    }

    /// Publish a message to `channel`
    ///
    /// Serialization and transport failures surface to the caller; a
    /// silently lost publish would strand consumers.
    pub async fn publish<T>(&self, channel: &str, message: &T) -> Result<(), PubSubError>
    where
        T: Serialize,
    {
        let payload = serde_json::to_string(message)?;
        let mut conn = self.supervisor.handle().await?;

        let published: Result<(), redis::RedisError> = conn.publish(channel, payload).await;
        published.map_err(PubSubError::Publish)?;
        Ok(())
    }

    /// Subscribe to `channel`, invoking `callback` for every message
    ///
    /// Opens a dedicated connection and spawns a listener task that
    /// decodes each payload as JSON. Payloads that fail to decode are
    /// handed to the callback as a raw string value instead of being
    /// dropped; non-UTF-8 bytes are replaced, never skipped.
    pub async fn subscribe<F>(&self, channel: &str, callback: F) -> Result<Subscription, PubSubError>
    where
        F: Fn(serde_json::Value) + Send + 'static,
    {
        let mut pubsub = self.supervisor.subscriber().await?;
        pubsub
            .subscribe(channel)
            .await
            .map_err(PubSubError::Subscribe)?;

        let channel_name = channel.to_string();
        let task = tokio::spawn(async move {
            let mut stream = pubsub.into_on_message();
            while let Some(message) = stream.next().await {
                callback(decode_payload(message.get_payload_bytes()));
            }
            // The stream ends when the dedicated connection drops;
            // delivery stops until the caller subscribes again.
            tracing::debug!(channel = %channel_name, "subscription stream ended");
        });

        Ok(Subscription {
            channel: channel.to_string(),
            task,
        })
    }
}

/// Every payload reaches the callback. JSON decodes to its value;
/// anything else arrives as a string, with invalid UTF-8 converted
/// lossily rather than dropped.
fn decode_payload(payload: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(payload);
    serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::KvConfig;
    use connection_system::Supervisor;
    use event_system::EventManager;
    use serde_json::json;

    #[test]
    fn test_decode_payload_json() {
        let value = decode_payload(b"{\"id\":7}");
        assert_eq!(value, json!({"id": 7}));
    }

    #[test]
    fn test_decode_payload_falls_back_to_raw() {
        let value = decode_payload(b"not json");
        assert_eq!(value, json!("not json"));
    }

    #[test]
    fn test_decode_payload_delivers_invalid_utf8() {
        // Binary frames still reach the callback, replacement characters
        // standing in for the bytes that have no text form.
        let value = decode_payload(&[0xff, 0xfe, 0x01]);
        match value {
            serde_json::Value::String(text) => assert!(text.contains('\u{FFFD}')),
            other => panic!("expected raw string fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_subscription_handle_reports_channel() {
        let subscription = Subscription {
            channel: "orders".to_string(),
            task: tokio::spawn(async {}),
        };
        assert_eq!(subscription.channel(), "orders");
        subscription.close();
    }

    #[tokio::test]
    async fn test_publish_surfaces_error_when_closed() {
        let supervisor = Arc::new(
            KvSupervisor::new(KvConfig::default(), Arc::new(EventManager::new())).unwrap(),
        );
        supervisor.disconnect().await.unwrap();

        let pubsub = PubSub::new(supervisor);
        let result = pubsub.publish("orders", &json!({"id": 1})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_subscribe_surfaces_error_when_closed() {
        let supervisor = Arc::new(
            KvSupervisor::new(KvConfig::default(), Arc::new(EventManager::new())).unwrap(),
        );
        supervisor.disconnect().await.unwrap();

        let pubsub = PubSub::new(supervisor);
        let result = pubsub.subscribe("orders", |_| {}).await;
        assert!(result.is_err());
    }
}
