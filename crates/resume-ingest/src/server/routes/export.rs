//! CSV report download

use axum::{
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{Error, Result};
use crate::report::{export_csv, REPORT_FILENAME};
use crate::types::ExportRequest;

/// Render caller-supplied (possibly edited) records as a CSV attachment.
/// Bodies that fail to decode get the JSON error body rather than axum's plain-text rejection.
pub async fn export_report(
    payload: std::result::Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(|rejection| {
        Error::invalid_request(format!("Invalid candidates data: {}", rejection.body_text()))
    })?;
    if request.candidates.is_empty() {
        return Err(Error::invalid_request("Invalid candidates data"));
    }

    let body = export_csv(&request.candidates)?;
    tracing::info!("Exported {} candidate row(s)", request.candidates.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}
