//! Error types for equation extraction

use std::path::PathBuf;
use thiserror::Error;

use crate::document::Strategy;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(
        "Unsupported legacy Word format: {}\n\
        eqdocx only reads .docx files. Open the document in Word or LibreOffice \
        and save it as .docx, then try again.",
        .0.display()
    )]
    UnsupportedLegacyFormat(PathBuf),

    #[error("Invalid .docx file {}: {reason}", path.display())]
    CorruptOrUnsupportedFormat { path: PathBuf, reason: String },

    #[error("{strategy} failed: {reason}")]
    ExtractionFailure { strategy: Strategy, reason: String },
}

impl ExtractError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ExtractError::CorruptOrUnsupportedFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn failure(strategy: Strategy, reason: impl ToString) -> Self {
        ExtractError::ExtractionFailure {
            strategy,
            reason: reason.to_string(),
        }
    }
}
