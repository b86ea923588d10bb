use crate::error::{DocumentError, Result};
use std::path::Path;

/// Text pulled out of a document, one entry per page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub pages: Vec<String>,

    /// Pages whose text could not be extracted; they are kept as empty pages
    pub page_errors: usize,
}

impl ExtractedDocument {
    /// All pages joined with a newline separator
    #[must_use]
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}

/// A document format that can be read into per-page text
pub trait TextSource {
    /// Whether this source handles the file at `path`
    fn accepts(&self, path: &Path) -> bool;

    fn extract(&self, path: &Path) -> Result<ExtractedDocument>;
}

/// PDF documents, read page by page with `lopdf`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl TextSource for PdfTextSource {
    fn accepts(&self, path: &Path) -> bool {
        has_extension(path, "pdf")
    }

    fn extract(&self, path: &Path) -> Result<ExtractedDocument> {
        let document =
            lopdf::Document::load(path).map_err(|e| DocumentError::unreadable(path, e))?;
        pdf_pages(path, &document)
    }
}

/// Per-page text of a loaded PDF, in page order
fn pdf_pages(path: &Path, document: &lopdf::Document) -> Result<ExtractedDocument> {
    if document.is_encrypted() {
        return Err(DocumentError::Encrypted(path.to_path_buf()));
    }

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    let total = page_numbers.len();
    log::debug!("{}: {} pages", path.display(), total);

    let mut extracted = ExtractedDocument::default();
    for (index, number) in page_numbers.into_iter().enumerate() {
        match document.extract_text(&[number]) {
            Ok(text) => extracted.pages.push(text),
            Err(err) => {
                log::warn!("Skipping page {number} of {}: {err}", path.display());
                extracted.page_errors += 1;
                extracted.pages.push(String::new());
            }
        }
        if (index + 1) % 10 == 0 {
            log::info!("Extracted {}/{} pages", index + 1, total);
        }
    }

    Ok(extracted)
}

/// Pre-extracted UTF-8 text, treated as a single page
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn accepts(&self, path: &Path) -> bool {
        has_extension(path, "txt")
    }

    fn extract(&self, path: &Path) -> Result<ExtractedDocument> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| DocumentError::unreadable(path, e))?;
        Ok(ExtractedDocument {
            pages: vec![text],
            page_errors: 0,
        })
    }
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;
    use std::path::PathBuf;

    #[test]
    fn extension_matching_ignores_case() {
        assert!(PdfTextSource.accepts(&PathBuf::from("report.PDF")));
        assert!(PlainTextSource.accepts(&PathBuf::from("notes.txt")));
        assert!(!PdfTextSource.accepts(&PathBuf::from("notes.txt")));
        assert!(!PlainTextSource.accepts(&PathBuf::from("README")));
    }

    #[test]
    fn encrypted_pdf_is_refused() {
        let mut document = lopdf::Document::with_version("1.5");
        let encrypt_id = document.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
        });
        document.trailer.set("Encrypt", encrypt_id);
        let err = pdf_pages(Path::new("locked.pdf"), &document).unwrap_err();
        assert!(matches!(err, DocumentError::Encrypted(_)));
    }

    #[test]
    fn joined_text_uses_newline_separator() {
        let doc = ExtractedDocument {
            pages: vec!["first".to_string(), "second".to_string()],
            page_errors: 0,
        };
        assert_eq!(doc.text(), "first\nsecond");
        assert!(!doc.is_blank());
        assert!(ExtractedDocument::default().is_blank());
    }
}
