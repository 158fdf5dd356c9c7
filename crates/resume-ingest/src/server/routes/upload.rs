//! Batch and single-document upload endpoints

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{supported_formats, BatchResponse, DocumentKind, UploadedBlob};

/// Read one multipart file field into a blob. Fields without a file name
/// are not uploads and yield `None`.
async fn read_blob(field: Field<'_>) -> Result<Option<UploadedBlob>> {
    let filename = match field.file_name() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Ok(None),
    };

    let data = field.bytes().await.map_err(|e| {
        Error::invalid_request(format!("Failed to read upload '{}': {}", filename, e))
    })?;

    tracing::debug!("Received '{}' ({} bytes)", filename, data.len());
    Ok(Some(UploadedBlob::new(filename, data)))
}

/// Process a batch of resumes sent as repeated `files` fields
pub async fn upload_resumes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>> {
    let mut blobs = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_request(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("files") {
            continue;
        }
        if let Some(blob) = read_blob(field).await? {
            blobs.push(blob);
        }
    }

    if blobs.is_empty() {
        return Err(Error::invalid_request("No files uploaded"));
    }

    tracing::info!("Batch upload with {} blob(s)", blobs.len());
    let result = state.pipeline().run(blobs).await?;
    Ok(Json(BatchResponse::from(result)))
}

/// Raw-text preview response
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub text: String,
    pub info: PreviewInfo,
}

#[derive(Debug, Serialize)]
pub struct PreviewInfo {
    pub filename: String,
}

/// Extract the raw text of one document sent as a `file` field
pub async fn upload_single(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PreviewResponse>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_request(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() == Some("file") {
            upload = read_blob(field).await?;
            break;
        }
    }

    let blob = upload.ok_or_else(|| Error::invalid_request("No file uploaded"))?;
    let kind = DocumentKind::from_filename(&blob.name).ok_or_else(|| {
        Error::invalid_request(format!(
            "Unsupported file format. Supported formats: {}",
            supported_formats()
        ))
    })?;

    let extractor = state.text_extractor().clone();
    let data = blob.data.clone();
    let text = tokio::task::spawn_blocking(move || extractor.extract(&data, kind))
        .await
        .map_err(|e| Error::internal(format!("Extraction task failed: {}", e)))??;

    Ok(Json(PreviewResponse {
        text,
        info: PreviewInfo {
            filename: blob.name,
        },
    }))
}
