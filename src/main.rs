//! todo-api - To-do list HTTP service
//!
//! Features:
//! - List, get, create, complete and delete items over HTTP
//! - In-memory or MongoDB storage, selected at startup
//! - Backend failures answer 503; the process keeps serving

use todo_api::constants::APP_VERSION;
use todo_api::{api, Config, Repository};

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();

    // Initialize logging
    let filter = match config.verbose {
        0 => "info,tower_http=debug",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .init();

    tracing::info!("todo-api v{}", APP_VERSION);

    config.validate()?;
    tracing::info!("Using {} backend", config.store.backend);

    let repository = Repository::connect(&config.store).await?;

    let addr: std::net::SocketAddr = config.bind.parse()?;
    let app = api::router(repository);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server available at http://{}/", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Terminated.");
    Ok(())
}

/// Resolve on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
