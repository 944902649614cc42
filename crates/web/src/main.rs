use std::sync::Arc;

use anyhow::Context;
use importer::{CandidateSource, source_from_location};
use storage::{open_store, redact_database_url};

mod config;
mod docs;
mod error;
mod features;
mod routes;
mod server;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting candidate score API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to score store at: {}",
        redact_database_url(&config.database_url)
    );
    let store = open_store(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize score store")?;

    let directory: Arc<dyn CandidateSource> =
        Arc::from(source_from_location(&config.applications_source));
    tracing::info!("Candidate directory: {}", directory.describe());

    let app = routes::router(AppState::new(Arc::clone(&store), directory));

    let listener = match server::bind_with_fallback(
        &config.host,
        config.port,
        config.port_fallback_attempts,
        server::PORT_RETRY_DELAY,
    )
    .await
    {
        Ok(listener) => listener,
        Err(e) => {
            store.close().await;
            return Err(e.context("Failed to start HTTP server"));
        }
    };

    let bind_address = listener.local_addr()?;
    tracing::info!("Server running at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await;

    tracing::info!("Closing score store");
    store.close().await;

    served.context("HTTP server failed")?;

    Ok(())
}
