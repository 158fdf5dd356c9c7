//! Configuration for the resume ingestion service

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Main ingestion configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Batch processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,
    /// Field extraction configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl IngestConfig {
    /// Load configuration from a TOML file. Missing sections fall back to defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.processing.max_files == 0 {
            return Err(Error::Config("processing.max_files must be at least 1".into()));
        }
        if self.processing.parallel_files == Some(0) {
            return Err(Error::Config("processing.parallel_files must be at least 1".into()));
        }
        if self.processing.file_timeout_secs == 0 || self.processing.pdf_timeout_secs == 0 {
            return Err(Error::Config("processing timeouts must be non-zero".into()));
        }
        if self.processing.max_entry_bytes == 0 {
            return Err(Error::Config("processing.max_entry_bytes must be non-zero".into()));
        }
        let ex = &self.extraction;
        if ex.min_name_words == 0 || ex.min_name_words > ex.max_name_words {
            return Err(Error::Config(format!(
                "invalid name word range {}..={}",
                ex.min_name_words, ex.max_name_words
            )));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024,
        }
    }
}

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Maximum number of resume files one batch may contain after archive expansion
    pub max_files: usize,
    /// Number of files decoded concurrently (default: CPU count clamped to 4..=8)
    pub parallel_files: Option<usize>,
    /// Timeout for processing a single file in seconds
    pub file_timeout_secs: u64,
    /// Timeout for the primary PDF decoder before falling back to lopdf
    pub pdf_timeout_secs: u64,
    /// Largest decompressed archive entry accepted, in bytes (default: 50MB)
    pub max_entry_bytes: u64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_files: 100,
            parallel_files: None,
            file_timeout_secs: 120,
            pdf_timeout_secs: 60,
            max_entry_bytes: 50 * 1024 * 1024,
        }
    }
}

impl ProcessingConfig {
    /// Effective worker count
    pub fn workers(&self) -> usize {
        self.parallel_files
            .unwrap_or_else(|| num_cpus::get().clamp(4, 8))
            .max(1)
    }

    pub fn file_timeout(&self) -> Duration {
        Duration::from_secs(self.file_timeout_secs)
    }

    pub fn pdf_timeout(&self) -> Duration {
        Duration::from_secs(self.pdf_timeout_secs)
    }
}

/// Name heuristic configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of non-blank leading lines inspected for a name
    pub name_scan_lines: usize,
    /// Minimum words in a name line
    pub min_name_words: usize,
    /// Maximum words in a name line
    pub max_name_words: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_scan_lines: 5,
            min_name_words: 2,
            max_name_words: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.processing.max_files, 100);
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.extraction.name_scan_lines, 5);
        let workers = config.processing.workers();
        assert!((4..=8).contains(&workers));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = IngestConfig::from_toml_str(
            r#"
            [processing]
            parallel_files = 2
            file_timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.processing.workers(), 2);
        assert_eq!(config.processing.file_timeout(), Duration::from_secs(30));
        assert_eq!(config.processing.max_files, 100);
        assert_eq!(config.server.max_upload_size, 50 * 1024 * 1024);
        assert_eq!(config.processing.max_entry_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(IngestConfig::from_toml_str("[processing]\nparallel_files = 0").is_err());
        assert!(IngestConfig::from_toml_str("[processing]\nmax_files = 0").is_err());
        assert!(IngestConfig::from_toml_str("[processing]\nmax_entry_bytes = 0").is_err());
        assert!(
            IngestConfig::from_toml_str("[extraction]\nmin_name_words = 5\nmax_name_words = 2")
                .is_err()
        );
    }
}
