//! Graceful shutdown coordination
//!
//! This module drains every supervised connection when the process
//! receives a termination signal. Drain failures are logged and never
//! block the remaining disconnects; shutdown always completes.

use tokio::signal;

use crate::core::Wirehaus;

impl Wirehaus {
    /// Block until SIGINT or SIGTERM, then drain every supervisor
    ///
    /// The entry point wires this up once; facades stay free of signal
    /// handling. Returns after the drain so the caller can exit with a
    /// success code.
    pub async fn run_until_shutdown(&self) {
        shutdown_signal().await;
        self.drain().await;
    }

    /// Disconnect every supervisor sequentially
    ///
    /// Each disconnect is bounded by the configured grace period; a
    /// failure or timeout is logged and the drain moves on.
    pub async fn drain(&self) {
        let grace = self.config().shutdown_grace();

        for supervisor in self.supervisors() {
            let store = supervisor.store();
            match tokio::time::timeout(grace, supervisor.disconnect()).await {
                Ok(Ok(())) => tracing::info!(store = %store, "disconnected"),
                Ok(Err(error)) => {
                    tracing::error!(store = %store, error = %error, "disconnect failed")
                }
                Err(_) => tracing::error!(store = %store, "disconnect timed out"),
            }
        }
    }
}

/// Resolve when the process receives SIGINT or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
