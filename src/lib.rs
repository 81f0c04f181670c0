//! eqdocx: Extract mathematical equations from .docx files
//!
//! This library reads the main document part of a Word document and finds
//! equations in it, preferring structured Office Math markup and falling back
//! to embedded equation objects and LaTeX-style inline spans.

pub mod config;
pub mod document;
pub mod equation;
pub mod error;
pub mod export;

/// Export format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

// Re-export commonly used types
pub use config::Config;
pub use document::{EquationRecord, Extraction, Strategy, extract_from_path};
pub use equation::{normalize, normalize_extraction};
pub use error::ExtractError;
