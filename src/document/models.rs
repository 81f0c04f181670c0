//! Core data structures for extraction results
//!
//! This module defines the public types passed between the container reader,
//! the extraction strategies and the output layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Body XML of a document, read once from the archive
///
/// A leading byte order mark is dropped, so offsets into `as_str()` match the
/// positions reported by the XML reader.
#[derive(Debug, Clone)]
pub struct RawXml {
    source: PathBuf,
    xml: String,
}

impl RawXml {
    pub fn new(source: impl Into<PathBuf>, mut xml: String) -> Self {
        if xml.starts_with('\u{feff}') {
            xml.replace_range(..'\u{feff}'.len_utf8(), "");
        }
        Self {
            source: source.into(),
            xml,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn as_str(&self) -> &str {
        &self.xml
    }
}

/// Extraction pass that produced a record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    MathMarkup,
    ObjectReference,
    InlinePattern,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::MathMarkup => "math markup scan",
            Strategy::ObjectReference => "equation object scan",
            Strategy::InlinePattern => "inline pattern scan",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquationRecord {
    pub content: String,
    /// True when `content` is a raw OMML subtree
    pub is_structured_math: bool,
    pub strategy: Strategy,
    /// Byte offset of the match in the body XML
    pub offset: usize,
}

impl EquationRecord {
    pub fn structured(content: String, offset: usize) -> Self {
        Self {
            content,
            is_structured_math: true,
            strategy: Strategy::MathMarkup,
            offset,
        }
    }

    pub fn plain(content: String, strategy: Strategy, offset: usize) -> Self {
        Self {
            content,
            is_structured_math: false,
            strategy,
            offset,
        }
    }
}

/// Records from the single strategy that won a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    pub strategy: Option<Strategy>,
    pub records: Vec<EquationRecord>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_xml_drops_byte_order_mark() {
        let xml = RawXml::new("paper.docx", "\u{feff}<w:document/>".to_string());
        assert_eq!(xml.as_str(), "<w:document/>");
        assert_eq!(xml.source(), Path::new("paper.docx"));
    }
}
