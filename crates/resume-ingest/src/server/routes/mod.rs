//! API routes for the ingestion server

pub mod candidates;
pub mod export;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Uploads - with larger body limit
        .route(
            "/upload-resumes",
            post(upload::upload_resumes).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route(
            "/upload",
            post(upload::upload_single).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/export-csv", post(export::export_report))
        .route("/update-candidate/:id", put(candidates::update_candidate))
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "resume-ingest",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Batch resume ingestion with contact extraction and deduplication",
        "endpoints": {
            "POST /api/upload-resumes": "Process resumes and zip archives (multipart field 'files')",
            "POST /api/upload": "Extract raw text from one document (multipart field 'file')",
            "POST /api/export-csv": "Download candidates as resume_parsing_report.csv",
            "PUT /api/update-candidate/:id": "Echo edited candidate fields",
            "GET /health": "Health check"
        },
        "supportedFormats": crate::types::SUPPORTED_EXTENSIONS,
    }))
}
