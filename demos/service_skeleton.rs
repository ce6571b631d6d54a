//! # Service Skeleton
//!
//! The wiring a real service performs at startup:
//! - Structured logging with an environment filter
//! - Configuration from defaults, TOML, and environment
//! - Eager connect, health report, and graceful shutdown on
//!   SIGINT/SIGTERM
//!
//! Run with: cargo run --example service_skeleton

use tracing_subscriber::EnvFilter;
use wirehaus::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.mode.default_log_filter())),
        )
        .init();

    tracing::info!(mode = %config.mode, "starting service skeleton");

    let haus = Wirehaus::new(config)?;

    // Fan lifecycle events out to wherever the service wants them;
    // the shared sink already writes them to the log.
    haus.events().add_callback(|event| {
        if event.is_error() {
            eprintln!(
                "connection trouble on {} store: {}",
                event.store,
                event.detail.as_deref().unwrap_or("unknown")
            );
        }
    });

    // A failed eager connect is not fatal; handles reconnect lazily
    // on first use.
    if let Err(error) = haus.connect_all().await {
        tracing::warn!(error = %error, "eager connect failed, continuing with lazy connections");
    }

    let report = haus.health_report().await;
    tracing::info!(
        key_value = report.key_value,
        document = report.document,
        relational = report.relational,
        "store health"
    );
    if !report.all_healthy() {
        tracing::warn!("one or more stores are unreachable");
    }

    // This is where a real service would mount its routes and start
    // serving traffic.
    tracing::info!("service running, press Ctrl+C to stop");
    haus.run_until_shutdown().await;

    tracing::info!("shutdown complete");
    Ok(())
}
