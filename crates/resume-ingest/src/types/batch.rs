//! Batch-level result and response types

use serde::{Deserialize, Serialize};

use super::candidate::CandidateRecord;

/// Batch counters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Admitted file count before deduplication
    pub total_resumes_uploaded: usize,
    pub successfully_parsed: usize,
    pub failed_to_parse: usize,
    /// Records collapsed by deduplication
    pub duplicates_removed: usize,
}

/// Deduplicated candidates plus their summary
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub candidates: Vec<CandidateRecord>,
    pub summary: Summary,
}

/// Response body of a batch submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub total_uploaded: usize,
    pub total_processed: usize,
    pub successfully_parsed: usize,
    pub failed_to_parse: usize,
    pub candidates: Vec<CandidateRecord>,
    pub summary: Summary,
}

impl From<BatchResult> for BatchResponse {
    fn from(result: BatchResult) -> Self {
        let summary = result.summary;
        Self {
            total_uploaded: summary.total_resumes_uploaded,
            total_processed: result.candidates.len(),
            successfully_parsed: summary.successfully_parsed,
            failed_to_parse: summary.failed_to_parse,
            candidates: result.candidates,
            summary,
        }
    }
}

/// Body of an export request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
}
