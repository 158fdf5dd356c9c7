//! End-to-end batch pipeline

use crate::config::IngestConfig;
use crate::error::Result;
use crate::ingestion::{
    check_admission, ArchiveExpander, CandidateAssembler, FieldExtractor, TextExtractor,
};
use crate::processing::{deduplicate, BatchProcessor};
use crate::report::summarize;
use crate::types::{BatchResult, UploadedBlob};

/// Expands, admits, processes, deduplicates and summarises one batch
#[derive(Clone)]
pub struct BatchPipeline {
    expander: ArchiveExpander,
    processor: BatchProcessor,
    max_files: usize,
}

impl Default for BatchPipeline {
    fn default() -> Self {
        Self::from_config(&IngestConfig::default())
    }
}

impl BatchPipeline {
    pub fn new(processor: BatchProcessor, max_files: usize) -> Self {
        Self {
            expander: ArchiveExpander::default(),
            processor,
            max_files,
        }
    }

    /// Replace the archive expander, e.g. to change the entry size limit
    pub fn with_expander(mut self, expander: ArchiveExpander) -> Self {
        self.expander = expander;
        self
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        let assembler = CandidateAssembler::new(
            TextExtractor::new(config.processing.pdf_timeout()),
            FieldExtractor::from_config(&config.extraction),
        );
        Self::new(
            BatchProcessor::from_config(assembler, &config.processing),
            config.processing.max_files,
        )
        .with_expander(ArchiveExpander::from_config(&config.processing))
    }

    pub fn processor(&self) -> &BatchProcessor {
        &self.processor
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn expander(&self) -> &ArchiveExpander {
        &self.expander
    }

    /// Run one batch.
    ///
    /// Fails only with a batch rejection, raised before any file is decoded.
    pub async fn run(&self, blobs: Vec<UploadedBlob>) -> Result<BatchResult> {
        let tasks = self.expander.expand(&blobs);
        drop(blobs);

        if let Err(e) = check_admission(&tasks, self.max_files) {
            tracing::warn!("Batch rejected: {}", e);
            return Err(e);
        }

        let admitted = tasks.len();
        let records = self.processor.process(tasks).await;
        let candidates = deduplicate(records);
        let summary = summarize(admitted, &candidates);

        tracing::info!(
            "Batch complete: {} admitted, {} succeeded, {} failed, {} duplicate(s) removed",
            summary.total_resumes_uploaded,
            summary.successfully_parsed,
            summary.failed_to_parse,
            summary.duplicates_removed
        );

        Ok(BatchResult {
            candidates,
            summary,
        })
    }
}
