//! Format-specific text extraction for resume documents

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::types::DocumentKind;

/// Decoding failure for a single document
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{cause}")]
pub struct ExtractionError {
    /// Human-readable cause
    pub cause: String,
}

impl ExtractionError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

/// Common ligatures and typographic characters that PDF fonts emit
/// in place of the plain ASCII the field patterns look for
const GLYPH_REPLACEMENTS: [(char, &str); 16] = [
    ('\u{2010}', "-"),   // Hyphen
    ('\u{2011}', "-"),   // Non-breaking hyphen
    ('\u{2012}', "-"),   // Figure dash
    ('\u{2013}', "-"),   // En dash
    ('\u{2014}', "-"),   // Em dash
    ('\u{2018}', "'"),   // Left single quote
    ('\u{2019}', "'"),   // Right single quote
    ('\u{201C}', "\""),  // Left double quote
    ('\u{201D}', "\""),  // Right double quote
    ('\u{00A0}', " "),   // Non-breaking space
    ('\u{2022}', "* "),  // Bullet
    ('\u{FB00}', "ff"),  // ff ligature
    ('\u{FB01}', "fi"),  // fi ligature
    ('\u{FB02}', "fl"),  // fl ligature
    ('\u{FB03}', "ffi"), // ffi ligature
    ('\u{FB04}', "ffl"), // ffl ligature
];

/// Replace ligatures and typographic glyphs, drop NULs, trim lines and
/// remove blank lines
fn cleanup_pdf_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match GLYPH_REPLACEMENTS.iter().find(|(glyph, _)| *glyph == ch) {
            Some((_, replacement)) => result.push_str(replacement),
            None if ch == '\0' => {}
            None => result.push(ch),
        }
    }

    result
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Dispatches document bytes to the decoder for their kind
#[derive(Debug, Clone)]
pub struct TextExtractor {
    /// How long pdf-extract may run before the lopdf fallback is used
    pdf_timeout: Duration,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl TextExtractor {
    pub fn new(pdf_timeout: Duration) -> Self {
        Self { pdf_timeout }
    }

    /// Extract raw text. Empty input always yields empty text.
    pub fn extract(&self, data: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
        if data.is_empty() {
            return Ok(String::new());
        }

        match kind {
            DocumentKind::Pdf => self.extract_pdf(data),
            DocumentKind::Docx => Self::extract_docx(data),
            DocumentKind::Doc => Ok(Self::extract_doc(data)),
        }
    }

    /// Run pdf-extract on a helper thread so a hang or panic inside the
    /// decoder degrades to the lopdf fallback instead of taking the worker down
    fn extract_pdf(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let data_vec = data.to_vec();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&data_vec);
            let _ = tx.send(result.map_err(|e| e.to_string()));
        });

        let raw = match rx.recv_timeout(self.pdf_timeout) {
            Ok(Ok(text)) => {
                let _ = handle.join();
                text
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                tracing::warn!("pdf-extract failed: {}, trying fallback", e);
                Self::extract_pdf_text_fallback(data)?
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // The decoder thread cannot be killed; it is left to finish on its own.
                tracing::error!(
                    "PDF extraction timeout after {}s, trying fallback",
                    self.pdf_timeout.as_secs()
                );
                Self::extract_pdf_text_fallback(data)?
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::error!("PDF extraction thread crashed, trying fallback");
                Self::extract_pdf_text_fallback(data)?
            }
        };

        let content = cleanup_pdf_text(&raw);
        if content.is_empty() {
            return Err(ExtractionError::new(
                "PDF appears to be image-based or has no extractable text",
            ));
        }
        Ok(content)
    }

    /// Fallback PDF text extraction using lopdf directly
    fn extract_pdf_text_fallback(data: &[u8]) -> Result<String, ExtractionError> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| ExtractionError::new(format!("Failed to load PDF: {}", e)))?;

        if doc.trailer.get(b"Encrypt").is_ok() {
            return Err(ExtractionError::new("PDF is encrypted"));
        }

        let mut all_text = String::new();
        for (page_num, page_id) in doc.get_pages() {
            match doc.get_page_content(page_id) {
                Ok(content) => {
                    let text = extract_text_from_content(&content);
                    if !text.is_empty() {
                        all_text.push_str(&text);
                        all_text.push('\n');
                    }
                }
                Err(e) => {
                    tracing::debug!("Could not get content for page {}: {}", page_num, e);
                }
            }
        }

        Ok(all_text)
    }

    /// Collect paragraph text from a DOCX body, one line per paragraph.
    /// Table cells are walked as well since resumes often lay contact details out in tables.
    fn extract_docx(data: &[u8]) -> Result<String, ExtractionError> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| ExtractionError::new(format!("Failed to read DOCX: {}", e)))?;

        let mut content = String::new();
        for child in &doc.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(p) => {
                    collect_paragraph_text(&p.children, &mut content);
                    content.push('\n');
                }
                docx_rs::DocumentChild::Table(table) => {
                    collect_table_text(table, &mut content);
                }
                _ => {}
            }
        }

        Ok(content)
    }

    /// Legacy .doc recovery: keep printable ASCII plus newline, carriage return
    /// and tab, replace every other byte with a space.
    ///
    /// This is not a parser for the binary Word format. Text stored as UTF-16
    /// or in compressed streams comes out as scattered letters, so contact
    /// details are often missed. It never fails.
    fn extract_doc(data: &[u8]) -> String {
        data.iter()
            .map(|&b| match b {
                b'\n' | b'\r' | b'\t' | 0x20..=0x7e => b as char,
                _ => ' ',
            })
            .collect()
    }
}

fn collect_paragraph_text(children: &[docx_rs::ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        docx_rs::RunChild::Text(t) => out.push_str(&t.text),
                        docx_rs::RunChild::Tab(_) => out.push('\t'),
                        docx_rs::RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => {
                collect_paragraph_text(&link.children, out);
            }
            _ => {}
        }
    }
}

fn collect_table_text(table: &docx_rs::Table, out: &mut String) {
    for row in &table.rows {
        let docx_rs::TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(p) => {
                        collect_paragraph_text(&p.children, out);
                        out.push('\n');
                    }
                    docx_rs::TableCellContent::Table(inner) => collect_table_text(inner, out),
                    _ => {}
                }
            }
        }
    }
}

/// Extract text from PDF content stream bytes.
/// Only literal strings shown with Tj/TJ between BT and ET are recovered.
fn extract_text_from_content(content: &[u8]) -> String {
    let content_str = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;
    let mut current_text = String::new();

    for line in content_str.lines() {
        let line = line.trim();

        if line == "BT" {
            in_text_block = true;
            continue;
        }

        if line == "ET" {
            in_text_block = false;
            if !current_text.is_empty() {
                text.push_str(&current_text);
                text.push('\n');
                current_text.clear();
            }
            continue;
        }

        if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) {
            if let (Some(start), Some(end)) = (line.find('('), line.rfind(')')) {
                if start < end {
                    let decoded = line[start + 1..end]
                        .replace("\\n", "\n")
                        .replace("\\r", "\r")
                        .replace("\\t", "\t")
                        .replace("\\(", "(")
                        .replace("\\)", ")")
                        .replace("\\\\", "\\");
                    current_text.push_str(&decoded);
                }
            }
        }
    }

    text
}
