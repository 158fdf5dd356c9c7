//! Document kinds and upload-level types

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Extensions admitted as resume documents
pub const SUPPORTED_EXTENSIONS: [&str; 3] = [".pdf", ".doc", ".docx"];

/// Container extension expanded by the archive expander
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Resume document formats, one per text extractor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Legacy Microsoft Word document (.doc), best-effort ASCII recovery only
    Doc,
}

impl DocumentKind {
    /// Classify a file name by extension (case-insensitive).
    ///
    /// Returns `None` for anything that is not an admissible resume document.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".docx") {
            Some(Self::Docx)
        } else if lower.ends_with(".doc") {
            Some(Self::Doc)
        } else if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else {
            None
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Doc => "Word Document (.doc)",
        }
    }
}

/// Whether a file name is admissible as a resume document
pub fn is_supported_document(filename: &str) -> bool {
    DocumentKind::from_filename(filename).is_some()
}

/// Whether a file name denotes a zip archive
pub fn is_archive(filename: &str) -> bool {
    filename.to_lowercase().ends_with(ARCHIVE_EXTENSION)
}

/// Human-readable list of supported formats
pub fn supported_formats() -> String {
    SUPPORTED_EXTENSIONS.join(", ")
}

/// Raw upload as submitted by a caller
#[derive(Debug, Clone)]
pub struct UploadedBlob {
    /// Original file name
    pub name: String,
    /// File content
    pub data: Bytes,
}

impl UploadedBlob {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// An admitted document queued for text extraction
#[derive(Debug, Clone)]
pub struct FileTask {
    /// File name (archive entries use their base name)
    pub name: String,
    /// Document content
    pub data: Bytes,
    /// Format decided at admission
    pub kind: DocumentKind,
}

impl FileTask {
    /// Admit a named blob, or `None` when the name carries no supported extension
    pub fn admit(name: impl Into<String>, data: impl Into<Bytes>) -> Option<Self> {
        let name = name.into();
        let kind = DocumentKind::from_filename(&name)?;
        Some(Self {
            name,
            data: data.into(),
            kind,
        })
    }
}
