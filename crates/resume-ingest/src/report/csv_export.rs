//! Tabular report export

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{Error, Result};
use crate::types::CandidateRecord;

/// Attachment name used when the report is downloaded
pub const REPORT_FILENAME: &str = "resume_parsing_report.csv";

/// Report columns, in order
pub const REPORT_HEADER: [&str; 7] = [
    "File Name",
    "Full Name",
    "Email",
    "Contact Number",
    "Parse Status",
    "Failure Reason",
    "Upload Timestamp",
];

/// Serialize records as CSV: header first, every field double-quoted,
/// rows separated by `\n`. Absent values are written as empty strings.
pub fn export_csv(records: &[CandidateRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADER)?;

    for record in records {
        let timestamp = record.upload_timestamp.to_rfc3339();
        writer.write_record([
            record.file_name.as_str(),
            record.full_name.as_deref().unwrap_or(""),
            record.email.as_deref().unwrap_or(""),
            record.contact_number.as_deref().unwrap_or(""),
            record.parse_status.as_str(),
            record.failure_reason.as_deref().unwrap_or(""),
            timestamp.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::internal(format!("CSV is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractedFields;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample() -> Vec<CandidateRecord> {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        vec![
            CandidateRecord::success(
                Uuid::new_v4(),
                "john.pdf".into(),
                ExtractedFields {
                    full_name: Some("John Smith".into()),
                    email: Some("john.smith@example.com".into()),
                    contact_number: Some("555-123-4567".into()),
                    ..Default::default()
                },
                "raw".into(),
                at,
            ),
            CandidateRecord::failed(
                Uuid::new_v4(),
                "scan.pdf".into(),
                "Parse error: PDF is encrypted".into(),
                at,
            ),
        ]
    }

    /// Split rows on the documented scheme: `"a","b",...` per line
    fn split_quoted(csv: &str) -> Vec<Vec<String>> {
        csv.lines()
            .map(|line| {
                line.trim_start_matches('"')
                    .trim_end_matches('"')
                    .split("\",\"")
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_layout_and_round_trip() {
        let csv = export_csv(&sample()).unwrap();
        assert!(csv.starts_with("\"File Name\",\"Full Name\",\"Email\""));
        assert!(csv.ends_with('\n'));

        let rows = split_quoted(&csv);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], REPORT_HEADER.to_vec());
        assert_eq!(
            rows[1],
            vec![
                "john.pdf",
                "John Smith",
                "john.smith@example.com",
                "555-123-4567",
                "success",
                "",
                "2024-03-01T12:00:00+00:00",
            ]
        );
        assert_eq!(rows[2][1], "");
        assert_eq!(rows[2][2], "");
        assert_eq!(rows[2][4], "failed");
        assert_eq!(rows[2][5], "Parse error: PDF is encrypted");
    }

    #[test]
    fn test_embedded_quotes_and_commas_survive() {
        let mut records = sample();
        records[1].failure_reason = Some("Missing mandatory fields: Full Name, \"Email\"".into());

        let csv = export_csv(&records).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][5], "Missing mandatory fields: Full Name, \"Email\"");
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
