//! The Wall - email-powered group journal.
//!
//! Posts arrive by email, collect into blocks, and are released on a delay
//! so the group reads each other in batches.

use the_wall::{api, config, store};

use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "the_wall=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting The Wall v{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("WALL_GIT_SHA")
    );

    // Load configuration
    let config = config::load_config()?;
    tracing::info!("Configuration loaded, port: {}", config.port);
    if config.password.is_empty() {
        tracing::warn!("No password configured, nobody will be able to log in");
    }

    // Open the store and seed configured users
    let store = store::WallStore::open(config::get_data_dir())?;
    for seed in &config.users {
        store.upsert_user(&seed.name, &seed.email).await?;
    }
    tracing::info!("Store opened, {} known users", config.users.len());

    let port = config.port;
    let shutdown_file = config.shutdown_file.clone();
    let state = api::AppState::new(store, config);
    let app = api::router(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_file))
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C, SIGTERM, or the shutdown file).
async fn shutdown_signal(shutdown_file: Option<PathBuf>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // Deployments that can't signal the process touch a file instead.
    let file_trigger = async {
        match shutdown_file {
            Some(path) => loop {
                tokio::time::sleep(Duration::from_secs(5)).await;
                if path.exists() {
                    if let Err(e) = std::fs::remove_file(&path) {
                        tracing::warn!("Failed to remove shutdown file: {}", e);
                    }
                    break;
                }
            },
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
        _ = file_trigger => tracing::info!("Shutdown file appeared, shutting down..."),
    }
}
