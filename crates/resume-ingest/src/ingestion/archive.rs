//! Archive expansion and batch admission

use std::io::{Cursor, Read};

use crate::config::ProcessingConfig;
use crate::error::{Error, Result};
use crate::types::{is_archive, supported_formats, FileTask, UploadedBlob};

/// Expands uploaded blobs into a flat, ordered list of admissible file tasks
#[derive(Debug, Clone, Copy)]
pub struct ArchiveExpander {
    max_entry_bytes: u64,
}

impl Default for ArchiveExpander {
    fn default() -> Self {
        Self::from_config(&ProcessingConfig::default())
    }
}

impl ArchiveExpander {
    /// Create an expander that refuses archive entries larger than `max_entry_bytes`
    pub fn new(max_entry_bytes: u64) -> Self {
        Self { max_entry_bytes }
    }

    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self::new(config.max_entry_bytes)
    }

    pub fn max_entry_bytes(&self) -> u64 {
        self.max_entry_bytes
    }

    /// Expand every blob in submission order.
    ///
    /// Zip archives contribute their admissible entries in archive order. A
    /// corrupt archive contributes nothing and is only logged. Blobs with an
    /// unsupported extension are dropped silently.
    pub fn expand(&self, blobs: &[UploadedBlob]) -> Vec<FileTask> {
        let mut tasks = Vec::new();

        for blob in blobs {
            if blob.name.is_empty() {
                continue;
            }

            if is_archive(&blob.name) {
                match self.expand_archive(blob) {
                    Ok(entries) => {
                        tracing::info!(
                            "Expanded archive '{}' into {} resume file(s)",
                            blob.name,
                            entries.len()
                        );
                        tasks.extend(entries);
                    }
                    Err(e) => {
                        tracing::warn!("Skipping archive: {}", e);
                    }
                }
                continue;
            }

            match FileTask::admit(blob.name.clone(), blob.data.clone()) {
                Some(task) => tasks.push(task),
                None => tracing::debug!("Ignoring unsupported upload '{}'", blob.name),
            }
        }

        tasks
    }

    /// Read all admissible entries of one zip archive.
    /// Any unreadable or oversized entry fails the whole archive.
    fn expand_archive(&self, blob: &UploadedBlob) -> Result<Vec<FileTask>> {
        let corrupt = |e: zip::result::ZipError| Error::archive_corrupt(&blob.name, e.to_string());
        let oversized = |name: &str| {
            Error::archive_corrupt(
                &blob.name,
                format!("{}: entry exceeds {} bytes", name, self.max_entry_bytes),
            )
        };

        let mut archive = zip::ZipArchive::new(Cursor::new(blob.data.clone())).map_err(corrupt)?;
        let mut tasks = Vec::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(corrupt)?;
            if entry.is_dir() {
                continue;
            }

            let name = entry_base_name(entry.name()).to_string();
            if FileTask::admit(name.clone(), Vec::new()).is_none() {
                tracing::debug!("Ignoring unsupported archive entry '{}'", entry.name());
                continue;
            }

            // The header size is only a claim; the bounded read below enforces it.
            if entry.size() > self.max_entry_bytes {
                return Err(oversized(&name));
            }

            let mut data = Vec::new();
            (&mut entry)
                .take(self.max_entry_bytes.saturating_add(1))
                .read_to_end(&mut data)
                .map_err(|e| Error::archive_corrupt(&blob.name, format!("{}: {}", name, e)))?;
            if data.len() as u64 > self.max_entry_bytes {
                return Err(oversized(&name));
            }

            if let Some(task) = FileTask::admit(name, data) {
                tasks.push(task);
            }
        }

        Ok(tasks)
    }
}

/// Apply the batch admission rules to an expanded task list
pub fn check_admission(tasks: &[FileTask], max_files: usize) -> Result<()> {
    if tasks.is_empty() {
        return Err(Error::NoValidFiles {
            supported: supported_formats(),
        });
    }
    if tasks.len() > max_files {
        return Err(Error::TooManyFiles {
            file_count: tasks.len(),
            limit: max_files,
        });
    }
    Ok(())
}

/// Strip any directory components from an archive entry name
fn entry_base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
