//! Application state for the ingestion server

use std::sync::Arc;

use crate::config::IngestConfig;
use crate::ingestion::TextExtractor;
use crate::pipeline::BatchPipeline;

/// Shared application state. Holds configuration and the stateless
/// pipeline only; nothing survives a request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: IngestConfig,
    pipeline: BatchPipeline,
}

impl AppState {
    pub fn new(config: IngestConfig) -> Self {
        let pipeline = BatchPipeline::from_config(&config);
        tracing::info!(
            "Pipeline ready: {} worker(s), max {} file(s) per batch",
            pipeline.processor().workers(),
            pipeline.max_files()
        );
        Self::with_pipeline(config, pipeline)
    }

    /// State around a custom pipeline
    pub fn with_pipeline(config: IngestConfig, pipeline: BatchPipeline) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pipeline }),
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.inner.config
    }

    pub fn pipeline(&self) -> &BatchPipeline {
        &self.inner.pipeline
    }

    pub fn text_extractor(&self) -> &TextExtractor {
        self.inner.pipeline.processor().assembler().text_extractor()
    }
}
