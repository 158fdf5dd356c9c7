//! resume-ingest: batch resume ingestion with contact extraction and deduplication
//!
//! Uploaded files and zip archives are expanded into resume documents, decoded
//! to raw text (PDF, DOCX, best-effort legacy DOC), mined for name, email and
//! phone, collapsed by email and summarised into a CSV-ready report. The
//! pipeline is stateless per batch; an axum server and an optional CLI sit on top.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod report;
pub mod server;
pub mod types;

pub use config::IngestConfig;
pub use error::{Error, Result};
pub use pipeline::BatchPipeline;
pub use types::{
    batch::{BatchResponse, BatchResult, Summary},
    candidate::{CandidateRecord, ParseStatus},
    document::{DocumentKind, FileTask, UploadedBlob},
};
