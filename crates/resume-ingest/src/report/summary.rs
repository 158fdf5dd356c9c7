//! Batch summary counters

use crate::types::{CandidateRecord, Summary};

/// Count outcomes of a deduplicated batch.
///
/// `admitted` is the FileTask count before deduplication; success and
/// failure counts describe the surviving records.
pub fn summarize(admitted: usize, candidates: &[CandidateRecord]) -> Summary {
    let successfully_parsed = candidates.iter().filter(|c| c.is_success()).count();
    Summary {
        total_resumes_uploaded: admitted,
        successfully_parsed,
        failed_to_parse: candidates.len() - successfully_parsed,
        duplicates_removed: admitted.saturating_sub(candidates.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractedFields;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_counts_after_dedup() {
        let ok = CandidateRecord::success(
            Uuid::new_v4(),
            "a.pdf".into(),
            ExtractedFields::default(),
            String::new(),
            Utc::now(),
        );
        let bad = CandidateRecord::failed(Uuid::new_v4(), "b.pdf".into(), "x".into(), Utc::now());

        let summary = summarize(5, &[ok, bad]);
        assert_eq!(summary.total_resumes_uploaded, 5);
        assert_eq!(summary.successfully_parsed, 1);
        assert_eq!(summary.failed_to_parse, 1);
        assert_eq!(summary.duplicates_removed, 3);
    }
}
