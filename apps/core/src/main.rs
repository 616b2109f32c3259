// Peerverse Core Entry Point
// Session recommendations, chat assistants and mentor matching over HTTP

mod assistant;
mod config;
mod error;
mod logging;
mod models;
mod preflight;
mod rate_limiter;
mod recommend;
mod routes;
mod state;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::{net::TcpListener, signal};
use tracing::info;

use config::Config;
use recommend::HttpCatalog;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    logging::init_logging(config.log_format)?;
    info!("Starting {} v{}", logging::SERVICE_NAME, env!("CARGO_PKG_VERSION"));

    let catalog = HttpCatalog::from_config(&config).context("Failed to build catalog client")?;
    let report = preflight::run_preflight_checks(&config, &catalog).await;
    if report.degraded {
        info!("Continuing in degraded mode");
    }

    let address = config.bind_address()?;
    let state = AppState::new(&config, Arc::new(catalog));
    let app = routes::create_router(state);

    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server running on {}", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
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
}
