//! Extraction orchestration
//!
//! This module contains `extract_from_path()`, which reads the body XML from a
//! .docx file and runs the extraction strategies over it. Strategies are tried
//! in priority order and the first one to return any record wins; results are
//! never merged across strategies.

use log::{debug, info, warn};
use std::path::Path;

use super::io::read_document_xml;
use super::models::*;
use super::parsing::inline::scan_inline_patterns;
use super::parsing::objects::scan_object_references;
use super::parsing::omml::scan_math_markup;
use crate::error::Result;

type ScanFn = fn(&RawXml) -> Result<Vec<EquationRecord>>;

/// Fallback strategies that can be switched off
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    pub object_references: bool,
    pub inline_patterns: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            object_references: true,
            inline_patterns: true,
        }
    }
}

/// Run the strategies over already-loaded body XML
pub fn extract_equations(xml: &RawXml, options: &ExtractOptions) -> Extraction {
    let strategies: [(Strategy, ScanFn, bool); 3] = [
        (Strategy::MathMarkup, scan_math_markup, true),
        (
            Strategy::ObjectReference,
            scan_object_references,
            options.object_references,
        ),
        (
            Strategy::InlinePattern,
            scan_inline_patterns,
            options.inline_patterns,
        ),
    ];

    for (strategy, scan, enabled) in strategies {
        if !enabled {
            debug!("Skipping {strategy} (disabled)");
            continue;
        }

        debug!("Trying {strategy}");
        match scan(xml) {
            Ok(records) if !records.is_empty() => {
                return Extraction {
                    strategy: Some(strategy),
                    records,
                };
            }
            Ok(_) => debug!("{strategy} found nothing"),
            Err(e) => warn!("{}: {e}; trying next strategy", xml.source().display()),
        }
    }

    Extraction::default()
}

/// Read `file_path` and extract its equations
///
/// Errors only come from reading the container; a document without any
/// equations gives an empty `Extraction`.
pub fn extract_from_path(file_path: &Path, options: &ExtractOptions) -> Result<Extraction> {
    info!("Processing DOCX file: {}", file_path.display());

    let xml = read_document_xml(file_path)?;
    let extraction = extract_equations(&xml, options);

    match extraction.strategy {
        Some(strategy) => info!("Found {} equations ({strategy})", extraction.len()),
        None => info!("Found 0 equations"),
    }

    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATH_DOC: &str = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math" xmlns:o="urn:schemas-microsoft-com:office:office"><w:body><w:p><m:oMath><m:r><m:t>x</m:t></m:r></m:oMath></w:p><w:p><w:r><w:t>$y$</w:t></w:r></w:p><w:p><w:r><w:object><o:OLEObject ProgID="Equation.3" ObjectID="_1"/></w:object></w:r></w:p></w:body></w:document>"#;

    fn raw(xml: &str) -> RawXml {
        RawXml::new("test.docx", xml.to_string())
    }

    #[test]
    fn test_math_markup_wins_over_fallbacks() {
        let extraction = extract_equations(&raw(MATH_DOC), &ExtractOptions::default());
        assert_eq!(extraction.strategy, Some(Strategy::MathMarkup));
        assert_eq!(extraction.len(), 1);
        assert!(extraction.records.iter().all(|r| r.is_structured_math));
    }

    #[test]
    fn test_object_references_win_over_inline_patterns() {
        let xml = r#"<w:body><w:t>$y$</w:t><o:OLEObject ProgID="Equation.3" ObjectID="_1"/></w:body>"#;
        let extraction = extract_equations(&raw(xml), &ExtractOptions::default());
        assert_eq!(extraction.strategy, Some(Strategy::ObjectReference));
        assert_eq!(extraction.len(), 1);
    }

    #[test]
    fn test_malformed_xml_falls_through_to_text_scans() {
        let xml = r#"<w:body xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math"><m:oMath><w:t>$E=mc^2$</w:t></m:oMath></w:wrong>"#;
        let extraction = extract_equations(&raw(xml), &ExtractOptions::default());
        assert_eq!(extraction.strategy, Some(Strategy::InlinePattern));
        assert_eq!(extraction.records[0].content, "E=mc^2");
    }

    #[test]
    fn test_disabled_strategies_are_skipped() {
        let xml = r#"<w:body><w:t>$y$</w:t><o:OLEObject ProgID="Equation.3"/></w:body>"#;
        let options = ExtractOptions {
            object_references: false,
            inline_patterns: true,
        };
        let extraction = extract_equations(&raw(xml), &options);
        assert_eq!(extraction.strategy, Some(Strategy::InlinePattern));
    }

    #[test]
    fn test_nothing_found_is_empty_not_error() {
        let xml = r#"<w:body><w:p><w:r><w:t>Plain prose.</w:t></w:r></w:p></w:body>"#;
        let extraction = extract_equations(&raw(xml), &ExtractOptions::default());
        assert!(extraction.is_empty());
        assert_eq!(extraction.strategy, None);
    }
}
