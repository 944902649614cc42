use std::io::ErrorKind;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::net::TcpListener;

pub const PORT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Bind `host:port`, moving on to the next port while the current one is
/// taken, at most `fallback_attempts` times.
pub async fn bind_with_fallback(
    host: &str,
    port: u16,
    fallback_attempts: u32,
    retry_delay: Duration,
) -> Result<TcpListener> {
    let mut port = port;
    let mut remaining = fallback_attempts;

    loop {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == ErrorKind::AddrInUse && remaining > 0 => {
                let Some(next) = port.checked_add(1) else {
                    bail!("Port {} in use and no higher port is available", port);
                };
                tracing::warn!("Port {} in use, trying {}...", port, next);
                remaining -= 1;
                port = next;
                tokio::time::sleep(retry_delay).await;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to bind {}:{}", host, port));
            }
        }
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
