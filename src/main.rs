// src/main.rs
use errors::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod config;
mod enricher;
mod errors;
mod export;
mod extractor;
mod fetcher;
mod input;
mod models;
mod normalizer;
mod orchestrator;
mod server;

use cli::CliApp;
use config::{load_config, Config};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let mut config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };
    config.geocoding.api_key = std::env::var("GOOGLE_MAPS_API_KEY").ok();

    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                format!("site_intel={}", config.logging.level)
                    .parse()
                    .unwrap_or_else(|_| "site_intel=info".parse().unwrap()),
            ),
        )
        .init();

    if config.geocoding.enabled && config.geocoding.api_key.is_none() {
        warn!("GOOGLE_MAPS_API_KEY not set; enrichment will report invalid_key per row");
    }

    // Create output directory
    tokio::fs::create_dir_all(&config.output.directory).await?;

    let app = CliApp::new(config);

    // Add graceful shutdown
    tokio::select! {
        result = app.run() => {
            result?;
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
