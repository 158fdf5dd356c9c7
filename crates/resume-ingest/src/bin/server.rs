//! Resume ingestion server binary
//!
//! Run with: cargo run -p resume-ingest --bin resume-ingest-server

use resume_ingest::{config::IngestConfig, server::IngestServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming an optional TOML config file
const CONFIG_ENV: &str = "RESUME_INGEST_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resume_ingest=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            tracing::info!("Loading configuration from {}", path);
            IngestConfig::from_toml_file(&path)?
        }
        Err(_) => IngestConfig::default(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Max files per batch: {}", config.processing.max_files);
    tracing::info!("  - Parallel files: {}", config.processing.workers());
    tracing::info!("  - File timeout: {}s", config.processing.file_timeout_secs);
    tracing::info!(
        "  - Max upload size: {} MB",
        config.server.max_upload_size / (1024 * 1024)
    );

    let server = IngestServer::new(config);

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/upload-resumes - Process a batch of resumes");
    println!("  POST /api/upload         - Preview one document's text");
    println!("  POST /api/export-csv     - Download the CSV report");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
