//! Document reading and equation extraction module
//!
//! This module reads the body XML out of a .docx package and runs the
//! extraction strategies over it.

pub(crate) mod io;
pub mod loader;
pub mod models;
pub mod namespaces;
pub(crate) mod parsing;

// Re-export all models and the extraction entry points
pub use io::{DOCUMENT_PART, DocumentHandle, read_document_xml};
pub use loader::{ExtractOptions, extract_equations, extract_from_path};
pub use models::*;
