//! Rendering of extraction results for the console, files and JSON

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

use crate::document::{Extraction, Strategy};

/// Where text output is going; the console gets a summary header
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sink {
    Console,
    File,
}

pub fn export_to_text(
    extraction: &Extraction,
    source: &Path,
    label: &str,
    sink: Sink,
) -> Result<String> {
    let mut output = String::new();

    if extraction.is_empty() {
        writeln!(output, "No equations found in {}", source.display())?;
        return Ok(output);
    }

    if sink == Sink::Console {
        writeln!(
            output,
            "\nExtracted {} equations from {}:\n",
            extraction.len(),
            source.display()
        )?;
    }

    for (i, record) in extraction.records.iter().enumerate() {
        writeln!(output, "{label} {}:\n{}\n", i + 1, record.content)?;
    }

    Ok(output)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: String,
    strategy: Option<Strategy>,
    count: usize,
    equations: Vec<JsonEquation<'a>>,
}

#[derive(Serialize)]
struct JsonEquation<'a> {
    index: usize,
    content: &'a str,
    is_structured_math: bool,
    strategy: Strategy,
    offset: usize,
}

pub fn export_to_json(extraction: &Extraction, source: &Path) -> Result<String> {
    let report = JsonReport {
        file: source.to_string_lossy().to_string(),
        strategy: extraction.strategy,
        count: extraction.len(),
        equations: extraction
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| JsonEquation {
                index: i + 1,
                content: &record.content,
                is_structured_math: record.is_structured_math,
                strategy: record.strategy,
                offset: record.offset,
            })
            .collect(),
    };

    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::EquationRecord;

    fn sample() -> Extraction {
        Extraction {
            strategy: Some(Strategy::InlinePattern),
            records: vec![
                EquationRecord::plain("E=mc^2".to_string(), Strategy::InlinePattern, 10),
                EquationRecord::plain("a+b".to_string(), Strategy::InlinePattern, 40),
            ],
        }
    }

    #[test]
    fn test_console_output_is_numbered() {
        let text =
            export_to_text(&sample(), Path::new("paper.docx"), "Equation", Sink::Console).unwrap();
        assert_eq!(
            text,
            "\nExtracted 2 equations from paper.docx:\n\nEquation 1:\nE=mc^2\n\nEquation 2:\na+b\n\n"
        );
    }

    #[test]
    fn test_file_output_has_no_header() {
        let text = export_to_text(&sample(), Path::new("paper.docx"), "Eq", Sink::File).unwrap();
        assert!(text.starts_with("Eq 1:\nE=mc^2\n\n"));
        assert!(!text.contains("Extracted"));
    }

    #[test]
    fn test_empty_extraction_reports_none_found() {
        let text = export_to_text(
            &Extraction::default(),
            Path::new("plain.docx"),
            "Equation",
            Sink::Console,
        )
        .unwrap();
        assert_eq!(text, "No equations found in plain.docx\n");
    }

    #[test]
    fn test_json_report() {
        let json = export_to_json(&sample(), Path::new("paper.docx")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["strategy"], "inline_pattern");
        assert_eq!(value["equations"][0]["content"], "E=mc^2");
        assert_eq!(value["equations"][1]["index"], 2);
        assert_eq!(value["equations"][0]["is_structured_math"], false);
    }
}
