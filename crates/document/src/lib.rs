//! Document text extraction.
//!
//! Turns a file on disk into per-page text. PDFs are parsed with `lopdf`;
//! `.txt` files are taken as one page of already-extracted text.

mod error;
mod source;

pub use error::{DocumentError, Result};
pub use source::{ExtractedDocument, PdfTextSource, PlainTextSource, TextSource};

use std::path::Path;

/// Extract per-page text from `path`, choosing the reader by extension
///
/// Files with an unrecognised extension are tried as PDF.
pub fn extract_text(path: impl AsRef<Path>) -> Result<ExtractedDocument> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let sources: [&dyn TextSource; 2] = [&PlainTextSource, &PdfTextSource];
    let source = sources
        .into_iter()
        .find(|s| s.accepts(path))
        .unwrap_or(&PdfTextSource);

    let extracted = source.extract(path)?;
    if extracted.is_blank() {
        log::warn!("No extractable text in {}", path.display());
    }
    Ok(extracted)
}
