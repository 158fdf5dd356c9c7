//! Bounded worker pool turning file tasks into candidate records

use futures::future::join_all;
use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tokio::time::timeout;

use crate::config::ProcessingConfig;
use crate::ingestion::CandidateAssembler;
use crate::types::{CandidateRecord, FileTask};

/// Runs the assembler over a batch with at most `workers` files in flight
#[derive(Clone)]
pub struct BatchProcessor {
    assembler: Arc<CandidateAssembler>,
    workers: usize,
    file_timeout: Duration,
}

impl BatchProcessor {
    pub fn new(assembler: CandidateAssembler, workers: usize, file_timeout: Duration) -> Self {
        Self {
            assembler: Arc::new(assembler),
            workers: workers.max(1),
            file_timeout,
        }
    }

    pub fn from_config(assembler: CandidateAssembler, config: &ProcessingConfig) -> Self {
        Self::new(assembler, config.workers(), config.file_timeout())
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn assembler(&self) -> &CandidateAssembler {
        &self.assembler
    }

    /// Process every task and return one record per task, in task order.
    ///
    /// Returns only after every task has produced its record. A task that
    /// exceeds the per-file timeout or panics yields a failed record instead.
    pub async fn process(&self, tasks: Vec<FileTask>) -> Vec<CandidateRecord> {
        let total = tasks.len();
        tracing::info!(
            "Processing {} file(s) with {} parallel worker(s)",
            total,
            self.workers
        );

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let file_timeout = self.file_timeout;

        let file_futures: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                let assembler = self.assembler.clone();
                let sem = semaphore.clone();

                async move {
                    let filename = task.name.clone();
                    let file_size = task.data.len();

                    let permit = match sem.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            return assembler.failed(&filename, format!("Processing error: {}", e))
                        }
                    };

                    tracing::debug!("[{}] Starting ({} bytes)", filename, file_size);
                    let start_time = Instant::now();

                    let worker_assembler = assembler.clone();
                    let handle = tokio::task::spawn_blocking(move || {
                        // Released only when the blocking work returns, even after a timeout.
                        let _permit = permit;
                        worker_assembler.assemble(&task)
                    });

                    let record = match timeout(file_timeout, handle).await {
                        Ok(Ok(record)) => record,
                        Ok(Err(join_error)) => {
                            let cause = join_error_cause(join_error);
                            tracing::error!("[{}] Worker failed: {}", filename, cause);
                            assembler.failed(&filename, format!("Processing error: {}", cause))
                        }
                        Err(_) => {
                            tracing::error!(
                                "TIMEOUT processing '{}' after {:.1}s (limit: {}s, size: {} bytes)",
                                filename,
                                start_time.elapsed().as_secs_f64(),
                                file_timeout.as_secs(),
                                file_size
                            );
                            assembler.failed(&filename, "Processing error: timeout".to_string())
                        }
                    };

                    let elapsed = start_time.elapsed();
                    if elapsed.as_secs() > 60 {
                        tracing::warn!(
                            "Slow processing for '{}': took {:.1}s",
                            filename,
                            elapsed.as_secs_f64()
                        );
                    }

                    record
                }
            })
            .collect();

        let records = join_all(file_futures).await;

        let succeeded = records.iter().filter(|r| r.is_success()).count();
        tracing::info!(
            "Processed {} file(s): {} succeeded, {} failed",
            total,
            succeeded,
            total - succeeded
        );

        records
    }
}

/// Best-effort description of why a blocking task did not return
fn join_error_cause(error: JoinError) -> String {
    if error.is_panic() {
        panic_message(error.into_panic())
    } else {
        error.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
