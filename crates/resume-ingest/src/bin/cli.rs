//! Batch resume ingestion from local files
//!
//! Run with: cargo run -p resume-ingest --features cli --bin resume-ingest-cli -- ./resumes

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkdir::WalkDir;

use resume_ingest::{
    config::IngestConfig,
    pipeline::BatchPipeline,
    report::export_csv,
    types::{is_archive, is_supported_document, BatchResponse, UploadedBlob},
};

#[derive(Parser)]
#[command(
    name = "resume-ingest-cli",
    version,
    about = "Extract candidate contact details from a batch of resumes"
)]
struct Cli {
    /// Resume files, zip archives or directories to scan
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Write the CSV report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of files decoded concurrently
    #[arg(short, long)]
    workers: Option<usize>,

    /// TOML configuration file
    #[arg(short, long, env = "RESUME_INGEST_CONFIG")]
    config: Option<PathBuf>,

    /// Print the full batch response as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resume_ingest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => IngestConfig::from_toml_file(path)?,
        None => IngestConfig::default(),
    };
    if let Some(workers) = cli.workers {
        config.processing.parallel_files = Some(workers);
    }
    config.validate()?;

    let blobs = collect_blobs(&cli.paths)?;
    let pipeline = BatchPipeline::from_config(&config);
    let result = pipeline.run(blobs).await?;

    if let Some(output) = &cli.output {
        let csv = export_csv(&result.candidates)?;
        std::fs::write(output, csv)
            .with_context(|| format!("Failed to write report to {}", output.display()))?;
    }

    let summary = result.summary;
    if cli.json {
        let response = BatchResponse::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        for candidate in &result.candidates {
            match &candidate.failure_reason {
                None => println!(
                    "OK    {}  {} <{}> {}",
                    candidate.file_name,
                    candidate.full_name.as_deref().unwrap_or(""),
                    candidate.email.as_deref().unwrap_or(""),
                    candidate.contact_number.as_deref().unwrap_or("")
                ),
                Some(reason) => println!("FAIL  {}  {}", candidate.file_name, reason),
            }
        }
        println!(
            "\n{} uploaded, {} parsed, {} failed, {} duplicate(s) removed",
            summary.total_resumes_uploaded,
            summary.successfully_parsed,
            summary.failed_to_parse,
            summary.duplicates_removed
        );
    }

    if let Some(output) = &cli.output {
        eprintln!("Report written to {}", output.display());
    }

    Ok(())
}

/// Read every candidate file under the given paths, in path order.
/// Directories are walked recursively in file-name order.
fn collect_blobs(paths: &[PathBuf]) -> Result<Vec<UploadedBlob>> {
    let mut blobs = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && is_candidate_file(entry.path()) {
                    blobs.push(read_blob(entry.path())?);
                }
            }
        } else {
            blobs.push(read_blob(path)?);
        }
    }

    Ok(blobs)
}

fn is_candidate_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| is_supported_document(name) || is_archive(name))
        .unwrap_or(false)
}

fn read_blob(path: &Path) -> Result<UploadedBlob> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadedBlob::new(name, data))
}
