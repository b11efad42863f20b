//! matron-board - headless queue board: polls the queue and logs its state.

use std::sync::Arc;

use matron_client::ResourceCache;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matron_app::{config::AppConfig, controller, keys, poller};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting matron board...");

    let config = AppConfig::load(
        std::path::Path::new("matron.yaml")
            .exists()
            .then_some("matron.yaml"),
    )
    .unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let client = match config.client() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to build REST client: {}", e);
            std::process::exit(1);
        }
    };

    let cache = Arc::new(ResourceCache::new());
    let board = controller::queue_board(cache.clone(), client.clone(), config.list.page_size);

    tracing::info!(
        server = %config.server.rest_base_url,
        interval_ms = config.polling.interval_ms,
        "Polling queue entries"
    );

    let poller = poller::spawn_queue_poller(
        cache.clone(),
        client,
        config.poll_interval(),
        config.max_backoff(),
    );

    let mut ticker = tokio::time::interval(config.poll_interval());
    let mut last_revision = 0;

    loop {
        tokio::select! {
            _ = shutdown_signal() => break,
            _ = ticker.tick() => {
                let revision = cache.snapshot(keys::QUEUE_ENTRIES).revision;
                if revision == last_revision {
                    continue;
                }
                last_revision = revision;

                let result = board.current();
                tracing::info!(waiting = result.total_count, "Queue board updated");
                for row in &result.rows {
                    tracing::debug!(
                        patient = %row.patient_name,
                        queue = %row.queue,
                        status = %row.status,
                        wait_minutes = row.wait_minutes,
                        "Entry"
                    );
                }
            }
        }
    }

    poller.stop().await;
    tracing::info!("Board shut down gracefully");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
