use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Reasons a document cannot be turned into text
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unreadable document {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Encrypted document: {}", .0.display())]
    Encrypted(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DocumentError {
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
