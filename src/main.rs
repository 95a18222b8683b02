//! Cache Driver Gateway
//!
//! Serves a configured cache driver (in-memory or redis) over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_driver::api::{create_router, AppState};
use cache_driver::config::{BackendKind, GatewayConfig};
use cache_driver::{spawn_prune_task, CacheDriver, MemoryDriver, RedisDriver};

/// Main entry point for the gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the configured driver
/// 4. Start background prune task
/// 5. Serve the router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_driver=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cache driver gateway");

    let config = GatewayConfig::from_env().map_err(|e| anyhow!(e))?;
    info!(
        "Configuration loaded: backend={:?}, max_age={:?}, port={}, prune_interval={}s",
        config.backend, config.driver.max_age, config.server_port, config.prune_interval
    );

    let driver: Arc<dyn CacheDriver> = match config.backend {
        BackendKind::Memory => Arc::new(MemoryDriver::new(&config.driver)),
        BackendKind::Redis => Arc::new(
            RedisDriver::connect(&config.redis_url, &config.driver)
                .await
                .with_context(|| format!("failed to connect to {}", config.redis_url))?,
        ),
    };
    info!(driver = driver.driver_type(), "Cache driver initialized");

    let prune_handle = (config.prune_interval > 0).then(|| {
        spawn_prune_task(driver.clone(), Duration::from_secs(config.prune_interval))
    });

    let app = create_router(AppState::from_shared(driver));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(prune_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the prune task.
async fn shutdown_signal(prune_handle: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = prune_handle {
        handle.abort();
        warn!("Prune task aborted");
    }
}
