//! Email-keyed deduplication of candidate records

use std::collections::HashMap;

use crate::types::CandidateRecord;

/// Collapse successful records sharing an email into the most recent one.
///
/// Within an email group the record with the latest upload timestamp wins;
/// on a tie the one seen later wins. Failed records and records without an
/// email are always kept. Output keeps the first-seen position of each
/// surviving identity.
///
/// Timestamps are taken when a record is assembled, so with parallel workers
/// "latest" means the file that finished decoding last, not the one submitted
/// last. A slow older upload can replace a faster newer one.
pub fn deduplicate(records: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
    let mut kept: Vec<CandidateRecord> = Vec::with_capacity(records.len());
    let mut slot_by_email: HashMap<String, usize> = HashMap::new();

    for record in records {
        let email = match (&record.email, record.is_success()) {
            (Some(email), true) => email.clone(),
            _ => {
                kept.push(record);
                continue;
            }
        };

        match slot_by_email.get(&email) {
            Some(&slot) => {
                if record.upload_timestamp >= kept[slot].upload_timestamp {
                    kept[slot] = record;
                }
            }
            None => {
                slot_by_email.insert(email, kept.len());
                kept.push(record);
            }
        }
    }

    kept
}
