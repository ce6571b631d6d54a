//! # Basic Pub/Sub Example
//!
//! This example demonstrates publish/subscribe over the supervised
//! Redis connection:
//! - A dedicated subscriber connection per subscription
//! - JSON decoding with a raw-string fallback
//! - Exact channel matching (no patterns)
//! - Explicit close as the only way to stop a listener
//!
//! Run with: cargo run --example pubsub_basic

use std::time::Duration;
use wirehaus::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 Wirehaus Basic Pub/Sub Example");
    println!("=================================");

    // 1. Registry Setup
    println!("\n🔌 Registry Setup");
    println!("-----------------");

    // from_env reads wirehaus.toml plus REDIS_URL-style overrides
    let haus = Wirehaus::from_env()?;

    // Test Redis connectivity
    if !haus.kv().health_check().await {
        println!("❌ Redis connection failed");
        println!("💡 Please start Redis: docker run -d --name redis -p 6379:6379 redis:7-alpine");
        return Ok(());
    }
    println!("✅ Redis connection healthy");

    let pubsub = haus.pubsub();

    // 2. Subscribing
    println!("\n📡 Subscribing");
    println!("--------------");

    // Each subscription opens its own connection so the shared one
    // stays free for cache traffic.
    let orders = pubsub
        .subscribe("orders", |message| {
            println!("   [orders] received: {}", message);
        })
        .await?;
    println!("✅ Subscribed to \"{}\" on a dedicated connection", orders.channel());

    // Give the subscriber a moment to register before publishing
    tokio::time::sleep(Duration::from_millis(200)).await;

    // 3. Publishing
    println!("\n📬 Publishing");
    println!("-------------");

    pubsub
        .publish("orders", &serde_json::json!({ "order_id": 1001, "total_cents": 2999 }))
        .await?;
    pubsub
        .publish("orders", &serde_json::json!({ "order_id": 1002, "total_cents": 12999 }))
        .await?;
    println!("Published two order events");

    // A different channel never reaches the orders callback
    pubsub
        .publish("invoices", &serde_json::json!({ "invoice_id": 7 }))
        .await?;
    println!("Published one invoice event (not delivered to the orders listener)");

    tokio::time::sleep(Duration::from_millis(500)).await;

    // 4. Closing
    println!("\n🔚 Closing");
    println!("----------");

    println!("Subscription active: {}", orders.is_active());
    orders.close();
    println!("✅ Subscription closed");

    // Messages published now are dropped; there is no unsubscribe
    // primitive, closing the listener is the only way out.
    pubsub
        .publish("orders", &serde_json::json!({ "order_id": 1003 }))
        .await?;
    tokio::time::sleep(Duration::from_millis(200)).await;
    println!("Order 1003 published after close: no delivery");

    haus.drain().await;
    println!("✅ All connections drained");

    println!("\n🔧 How Pub/Sub Works:");
    println!("   • publish serializes the value to JSON and returns the send result");
    println!("   • Each subscribe spawns a listener task on its own connection");
    println!("   • Payloads that fail to decode arrive as raw strings");
    println!("   • A dropped subscriber connection ends the stream; subscribe again to resume");

    Ok(())
}
