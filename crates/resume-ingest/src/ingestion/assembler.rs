//! Per-file candidate record assembly

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::types::{CandidateRecord, FileTask};

use super::fields::FieldExtractor;
use super::parser::TextExtractor;

/// Source of record identifiers
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// Random v4 UUIDs, unique without any shared counter
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Turns one file task into exactly one candidate record
#[derive(Clone)]
pub struct CandidateAssembler {
    text_extractor: TextExtractor,
    field_extractor: FieldExtractor,
    ids: Arc<dyn IdGenerator>,
}

impl Default for CandidateAssembler {
    fn default() -> Self {
        Self::new(TextExtractor::default(), FieldExtractor::default())
    }
}

impl CandidateAssembler {
    pub fn new(text_extractor: TextExtractor, field_extractor: FieldExtractor) -> Self {
        Self {
            text_extractor,
            field_extractor,
            ids: Arc::new(UuidGenerator),
        }
    }

    /// Replace the identifier source
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn field_extractor(&self) -> &FieldExtractor {
        &self.field_extractor
    }

    pub fn text_extractor(&self) -> &TextExtractor {
        &self.text_extractor
    }

    /// Extract, validate and stamp a record. Never fails: decoding errors
    /// and missing fields both produce a `failed` record.
    pub fn assemble(&self, task: &FileTask) -> CandidateRecord {
        let text = match self.text_extractor.extract(&task.data, task.kind) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("[{}] Text extraction failed: {}", task.name, e);
                return self.failed(&task.name, format!("Parse error: {}", e));
            }
        };

        let fields = self.field_extractor.extract(&text);
        let missing = fields.missing_labels();

        if missing.is_empty() {
            tracing::debug!("[{}] All mandatory fields extracted", task.name);
            CandidateRecord::success(
                self.ids.next_id(),
                task.name.clone(),
                fields,
                text,
                Utc::now(),
            )
        } else {
            let reason = format!("Missing mandatory fields: {}", missing.join(", "));
            tracing::info!("[{}] {}", task.name, reason);
            CandidateRecord::incomplete(
                self.ids.next_id(),
                task.name.clone(),
                fields,
                reason,
                Utc::now(),
            )
        }
    }

    /// Failed record for a file that never produced an outcome of its own
    pub fn failed(&self, file_name: &str, reason: String) -> CandidateRecord {
        CandidateRecord::failed(self.ids.next_id(), file_name.to_string(), reason, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParseStatus;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct SequentialIds(AtomicU64);

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> Uuid {
            Uuid::from_u128(u128::from(self.0.fetch_add(1, Ordering::SeqCst) + 1))
        }
    }

    fn doc_task(name: &str, text: &str) -> FileTask {
        FileTask::admit(name, text.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_complete_resume_succeeds() {
        let record = CandidateAssembler::default().assemble(&doc_task(
            "john.doc",
            "John Smith\nEmail: john.smith@example.com\nPhone: 555-123-4567",
        ));

        assert_eq!(record.parse_status, ParseStatus::Success);
        assert_eq!(record.full_name.as_deref(), Some("John Smith"));
        assert_eq!(record.email.as_deref(), Some("john.smith@example.com"));
        assert_eq!(record.contact_number.as_deref(), Some("555-123-4567"));
        assert!(record.raw_text.as_deref().unwrap().contains("John Smith"));
        assert!(record.failure_reason.is_none());
    }

    #[test]
    fn test_missing_email_fails_with_label() {
        let record = CandidateAssembler::default()
            .assemble(&doc_task("jane.doc", "Jane Roe\nPhone: 555-987-6543"));

        assert_eq!(record.parse_status, ParseStatus::Failed);
        assert_eq!(
            record.failure_reason.as_deref(),
            Some("Missing mandatory fields: Email")
        );
        assert_eq!(record.full_name.as_deref(), Some("Jane Roe"));
        assert!(record.raw_text.is_none());
    }

    #[test]
    fn test_empty_file_lists_every_field() {
        let record = CandidateAssembler::default().assemble(&doc_task("empty.pdf", ""));
        assert_eq!(
            record.failure_reason.as_deref(),
            Some("Missing mandatory fields: Full Name, Email, Contact Number")
        );
    }

    #[test]
    fn test_decode_error_becomes_parse_error() {
        let record = CandidateAssembler::default().assemble(&doc_task("bad.docx", "garbage"));
        assert_eq!(record.parse_status, ParseStatus::Failed);
        assert!(record
            .failure_reason
            .as_deref()
            .unwrap()
            .starts_with("Parse error: "));
    }

    #[test]
    fn test_injected_ids() {
        let assembler = CandidateAssembler::default()
            .with_id_generator(Arc::new(SequentialIds(AtomicU64::new(0))));
        let first = assembler.assemble(&doc_task("a.doc", ""));
        let second = assembler.failed("b.doc", "Processing error: timeout".into());
        assert_eq!(first.id, Uuid::from_u128(1));
        assert_eq!(second.id, Uuid::from_u128(2));
    }
}
