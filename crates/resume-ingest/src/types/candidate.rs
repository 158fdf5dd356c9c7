//! Candidate records produced per resume file

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of parsing one file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParseStatus {
    /// Text extracted and all mandatory fields found
    Success,
    /// Extraction error or at least one mandatory field missing
    Failed,
}

impl ParseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

/// Contact fields recovered from raw text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    /// Every distinct email found, in document order
    pub all_emails: Vec<String>,
    /// Every distinct phone number found, in document order
    pub all_phones: Vec<String>,
}

impl ExtractedFields {
    /// Labels of the mandatory fields that are absent, in report order
    pub fn missing_labels(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.is_none() {
            missing.push("Full Name");
        }
        if self.email.is_none() {
            missing.push("Email");
        }
        if self.contact_number.is_none() {
            missing.push("Contact Number");
        }
        missing
    }
}

/// One output row per admitted resume file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    /// Process-unique record ID
    #[serde(default)]
    pub id: Uuid,
    /// Source file name
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    /// Extracted text, kept only for successful records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    pub parse_status: ParseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub upload_timestamp: DateTime<Utc>,
}

impl CandidateRecord {
    /// Record for a file whose text decoded and whose mandatory fields were all found
    pub fn success(
        id: Uuid,
        file_name: String,
        fields: ExtractedFields,
        raw_text: String,
        upload_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            file_name,
            full_name: fields.full_name,
            email: fields.email,
            contact_number: fields.contact_number,
            raw_text: Some(raw_text),
            parse_status: ParseStatus::Success,
            failure_reason: None,
            upload_timestamp,
        }
    }

    /// Record for a file that decoded but lacks mandatory fields.
    /// Whatever was found is kept so the caller can correct the rest.
    pub fn incomplete(
        id: Uuid,
        file_name: String,
        fields: ExtractedFields,
        reason: String,
        upload_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            file_name,
            full_name: fields.full_name,
            email: fields.email,
            contact_number: fields.contact_number,
            raw_text: None,
            parse_status: ParseStatus::Failed,
            failure_reason: Some(reason),
            upload_timestamp,
        }
    }

    /// Record for a file that could not be processed at all
    pub fn failed(
        id: Uuid,
        file_name: String,
        reason: String,
        upload_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            file_name,
            full_name: None,
            email: None,
            contact_number: None,
            raw_text: None,
            parse_status: ParseStatus::Failed,
            failure_reason: Some(reason),
            upload_timestamp,
        }
    }

    pub fn is_success(&self) -> bool {
        self.parse_status == ParseStatus::Success
    }
}

/// Replacement contact fields sent by the presentation layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

/// Echo of an accepted update. Nothing is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedCandidate {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub status: String,
}

impl CandidateUpdate {
    /// Normalise the update and echo it back under `id`.
    ///
    /// Blank values become `None`; surrounding whitespace is trimmed.
    pub fn echo(self, id: impl Into<String>) -> UpdatedCandidate {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        UpdatedCandidate {
            id: id.into(),
            full_name: clean(self.full_name),
            email: clean(self.email),
            contact_number: clean(self.contact_number),
            status: "updated".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_labels_order() {
        let fields = ExtractedFields {
            full_name: Some("Jane Doe".into()),
            ..Default::default()
        };
        assert_eq!(fields.missing_labels(), vec!["Email", "Contact Number"]);
        assert!(ExtractedFields {
            full_name: Some("a".into()),
            email: Some("b".into()),
            contact_number: Some("c".into()),
            ..Default::default()
        }
        .missing_labels()
        .is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let record = CandidateRecord::failed(
            Uuid::new_v4(),
            "broken.pdf".into(),
            "Parse error: bad xref".into(),
            Utc::now(),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["parseStatus"], "failed");
        assert_eq!(value["fileName"], "broken.pdf");
        assert_eq!(value["failureReason"], "Parse error: bad xref");
        assert!(value["fullName"].is_null());
        assert!(value.get("rawText").is_none());
    }

    #[test]
    fn test_update_echo_normalises() {
        let update = CandidateUpdate {
            full_name: Some("  Ada Lovelace ".into()),
            email: Some("".into()),
            contact_number: None,
        };
        let echoed = update.echo("abc");
        assert_eq!(echoed.id, "abc");
        assert_eq!(echoed.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(echoed.email, None);
        assert_eq!(echoed.status, "updated");
    }
}
