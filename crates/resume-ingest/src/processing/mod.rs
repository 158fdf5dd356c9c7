//! Concurrent batch processing and deduplication

mod dedup;
mod worker;

pub use dedup::deduplicate;
pub use worker::BatchProcessor;
