//! Taskboard server -- task list and game board over HTTP/JSON.
//!
//! # Usage
//!
//! ```bash
//! # Run in-memory on the default address 0.0.0.0:8080
//! cargo run --bin taskboard-server
//!
//! # Run on a custom address with a JSON snapshot file
//! cargo run --bin taskboard-server -- --bind 127.0.0.1:3000 --db tasks.json
//!
//! # Or via environment variable
//! TASKBOARD_ADDR=127.0.0.1:3000 cargo run --bin taskboard-server
//! ```

use std::sync::Arc;

use clap::Parser;
use taskboard_server::config::{ServerCliArgs, ServerConfig};
use taskboard_server::http;
use taskboard_server::persist::SnapshotFile;
use taskboard_server::state::AppState;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting taskboard server");

    let state = match &config.db_path {
        Some(path) => match AppState::with_snapshot(SnapshotFile::new(path), config.page_size) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "failed to load task snapshot");
                std::process::exit(1);
            }
        },
        None => AppState::in_memory(config.page_size),
    };

    match http::start_server(&config.bind_addr, Arc::new(state)).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "taskboard server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start server");
            std::process::exit(1);
        }
    }
}
