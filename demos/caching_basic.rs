//! # Basic Caching Example
//!
//! This example demonstrates the cache facade on top of the supervised
//! Redis connection:
//! - Building the connection registry
//! - Cache writes, hits, and misses with typed values
//! - Custom TTLs and pattern invalidation
//! - Sessions and rate limiting sharing the same connection
//!
//! Run with: cargo run --example caching_basic

use serde::{Deserialize, Serialize};
use wirehaus::prelude::*;

/// Simple product model for the caching demonstration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price_cents: i64,
    pub category: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 Wirehaus Basic Caching Example");
    println!("=================================");

    // 1. Registry Setup
    println!("\n🔌 Registry Setup");
    println!("-----------------");

    let config = AppConfig::load()?;
    let haus = Wirehaus::new(config)?;

    // Lifecycle events from every supervisor land here
    haus.events().add_callback(|event| {
        println!(
            "   [event] {} {}: {}",
            event.timestamp.format("%H:%M:%S"),
            event.store,
            event.kind
        );
    });

    // Test Redis connectivity
    if !haus.kv().health_check().await {
        println!("❌ Redis connection failed");
        println!("💡 Please start Redis: docker run -d --name redis -p 6379:6379 redis:7-alpine");
        return Ok(());
    }
    println!("✅ Redis connection healthy");

    let cache = haus.cache();

    // 2. Writes, Hits, and Misses
    println!("\n🗄️  Writes, Hits, and Misses");
    println!("----------------------------");

    let mouse = Product {
        id: 1,
        name: "Wireless Mouse".to_string(),
        price_cents: 2999,
        category: "electronics".to_string(),
    };

    let before: Option<Product> = cache.get("product:1").await;
    println!("Before writing: {:?}", before);

    cache.set("product:1", &mouse).await?;
    let after: Option<Product> = cache.get("product:1").await;
    println!("After writing:  {:?}", after.map(|p| p.name));

    // A corrupt or foreign entry decodes to None instead of an error
    let wrong_type: Option<u64> = cache.get("product:1").await;
    println!("Read back as the wrong type: {:?}", wrong_type);

    // 3. TTLs
    println!("\n⏱️  TTLs");
    println!("--------");

    println!("Default TTL: {} seconds", cache.config().default_ttl_seconds);

    // Short-lived entry with an explicit TTL
    cache.set_with_ttl("product:flash-sale", &mouse, 30).await?;
    println!("Flash-sale entry cached for 30 seconds");

    // 4. Invalidation
    println!("\n🧹 Invalidation");
    println!("---------------");

    let keyboard = Product {
        id: 2,
        name: "Mechanical Keyboard".to_string(),
        price_cents: 8999,
        category: "electronics".to_string(),
    };
    cache.set("product:2", &keyboard).await?;

    let removed = cache.delete("product:1").await;
    println!("Deleted product:1: {}", removed);
    let removed_again = cache.delete("product:1").await;
    println!("Deleted product:1 again: {}", removed_again);

    let swept = cache.delete_by_pattern("product:*").await;
    println!("Pattern delete removed {} remaining product keys", swept);

    // 5. Sessions
    println!("\n🔑 Sessions");
    println!("-----------");

    let sessions = haus.sessions();
    let session_id = uuid::Uuid::new_v4().to_string();

    sessions
        .set(&session_id, &serde_json::json!({ "user_id": 42, "roles": ["admin"] }))
        .await?;
    let session: Option<serde_json::Value> = sessions.get(&session_id).await;
    println!("Stored session {}: {:?}", &session_id[..8], session);
    println!("Session TTL: {} seconds", sessions.ttl_seconds());

    sessions.delete(&session_id).await;
    println!("Session deleted");

    // 6. Rate Limiting
    println!("\n🚦 Rate Limiting");
    println!("----------------");

    let limiter = haus.rate_limiter();
    for attempt in 1..=5u32 {
        let hits = limiter.increment_with_ttl("rate:demo-login", 60).await;
        let verdict = if hits > 3 { "blocked" } else { "allowed" };
        println!("Attempt {}: {} hits this window ({})", attempt, hits, verdict);
    }
    cache.delete("rate:demo-login").await;

    // 7. Shutdown
    println!("\n🔌 Shutting Down");
    println!("----------------");

    haus.drain().await;
    println!("✅ All connections drained");

    println!("\n🔧 How Caching Works:");
    println!("   • Values are serialized to JSON text before SET");
    println!("   • Every write carries a TTL; nothing lives forever");
    println!("   • Failed reads and deletes degrade to miss results");
    println!("   • Sessions and rate limits reuse the same supervised connection");

    println!("\n📚 Next Steps:");
    println!("   • Run the pubsub_basic example for messaging");
    println!("   • Run the service_skeleton example for full service wiring");

    Ok(())
}
