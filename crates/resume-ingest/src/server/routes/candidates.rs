//! Candidate edit echo

use axum::{extract::Path, Json};

use crate::types::{CandidateUpdate, UpdatedCandidate};

/// Echo an edited candidate back. Nothing is persisted.
pub async fn update_candidate(
    Path(id): Path<String>,
    Json(update): Json<CandidateUpdate>,
) -> Json<UpdatedCandidate> {
    tracing::debug!("Candidate {} edited", id);
    Json(update.echo(id))
}
