//! Core types for the ingestion pipeline

pub mod batch;
pub mod candidate;
pub mod document;

pub use batch::{BatchResponse, BatchResult, ExportRequest, Summary};
pub use candidate::{
    CandidateRecord, CandidateUpdate, ExtractedFields, ParseStatus, UpdatedCandidate,
};
pub use document::{
    is_archive, is_supported_document, supported_formats, DocumentKind, FileTask, UploadedBlob,
    ARCHIVE_EXTENSION, SUPPORTED_EXTENSIONS,
};
