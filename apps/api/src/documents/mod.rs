//! Document ingestion: PDF bytes → cleaned text.
//!
//! The upload is written to a temporary file that is removed when it drops,
//! then handed to `pdf-extract`. Extraction is CPU-bound, so callers run
//! `extract_document_text` on the blocking pool.

pub mod handlers;

use std::io::Write;

use bytes::Bytes;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::preprocess::clean_text;

const PDF_SIGNATURE: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Only PDF documents are supported")]
    NotPdf,

    #[error("Could not extract text from PDF: {0}")]
    Extraction(String),

    #[error("Could not store uploaded file: {0}")]
    Io(#[from] std::io::Error),
}

pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(PDF_SIGNATURE)
}

/// Saves `data` to a temporary file, extracts its text and cleans it.
pub fn extract_document_text(data: &Bytes) -> Result<String, DocumentError> {
    if !is_pdf(data) {
        return Err(DocumentError::NotPdf);
    }

    let mut file = NamedTempFile::with_prefix("edital-")?;
    file.write_all(data)?;
    file.flush()?;
    debug!("Stored upload at {}", file.path().display());

    // pdf-extract panics on some malformed fonts and encodings
    let path = file.path();
    let raw = std::panic::catch_unwind(|| pdf_extract::extract_text(path))
        .map_err(|_| DocumentError::Extraction("PDF parser aborted".to_string()))?
        .map_err(|e| DocumentError::Extraction(e.to_string()))?;

    Ok(clean_text(&raw))
}
