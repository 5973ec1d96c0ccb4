//! # garagehubd — garagehub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`garagehub.toml`, env vars)
//! - Initialize `tracing` logging
//! - Open the JSON persistence directory
//! - Build one HTTP notifier and one door accessory per configured door
//! - Register the accessories on the bridge
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use garagehub_adapter_http_axum::state::{AppState, HttpBridge};
use garagehub_adapter_notify_reqwest::HttpNotifier;
use garagehub_adapter_storage_json::JsonFileStore;
use garagehub_app::accessory::DoorAccessory;
use garagehub_app::bridge::Bridge;
use garagehub_app::event_bus::InProcessEventBus;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let bind_addr = config.bind_addr();

    // Persistence
    let store = Arc::new(JsonFileStore::open(&config.storage.path)?);

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(256));

    // Accessories
    let bridge = build_bridge(&config, &store, &event_bus)?;

    // HTTP
    let state = AppState::new(bridge, event_bus);
    let app = garagehub_adapter_http_axum::router::build(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "garagehubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("garagehubd stopped");
    Ok(())
}

/// Build one notifier and one accessory per configured door and register
/// them on a fresh bridge.
fn build_bridge(
    config: &Config,
    store: &Arc<JsonFileStore>,
    event_bus: &Arc<InProcessEventBus>,
) -> Result<HttpBridge<Arc<JsonFileStore>, HttpNotifier>, Box<dyn std::error::Error>> {
    let mut bridge = Bridge::new();
    for accessory_config in &config.accessories {
        let notifier = HttpNotifier::new(&accessory_config.notify, &config.notify)?;
        let accessory = DoorAccessory::new(
            accessory_config.clone(),
            Arc::clone(store),
            notifier,
            Arc::clone(event_bus),
        )?;
        bridge.add(accessory)?;
    }
    Ok(bridge)
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
