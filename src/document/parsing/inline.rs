//! LaTeX-style inline equation spans typed as plain text
//!
//! Recognizes `$$...$$`, `$...$`, `\[...\]` and `\(...\)`. A span never
//! crosses a tag, so only text typed inside a single run is found.

use log::debug;
use once_cell::sync::Lazy;
use quick_xml::escape::unescape;
use regex::Regex;

use crate::document::models::{EquationRecord, RawXml, Strategy};
use crate::error::Result;

// Alternation order matters: `$$` must be tried before `$`
static INLINE_EQUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\$\$(?P<display>[^$<>]+?)\$\$",
        r"|\\\[(?P<bracket>[^<>]+?)\\\]",
        r"|\\\((?P<paren>[^<>]+?)\\\)",
        r"|\$(?P<dollar>[^\s$<>](?:[^$<>]*[^\s$<>])?)\$",
    ))
    .expect("valid inline equation pattern")
});

const GROUPS: &[&str] = &["display", "bracket", "paren", "dollar"];

pub(crate) fn scan_inline_patterns(xml: &RawXml) -> Result<Vec<EquationRecord>> {
    let text = xml.as_str();
    let mut records = Vec::new();

    for caps in INLINE_EQUATION.captures_iter(text) {
        let Some((group, inner)) = GROUPS
            .iter()
            .find_map(|name| caps.name(name).map(|m| (*name, m)))
        else {
            continue;
        };

        let whole = caps.get(0).map_or(inner.range(), |m| m.range());
        // `$5 and $10` is currency, not math
        if group == "dollar"
            && text[whole.end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
        {
            continue;
        }

        let content = match unescape(inner.as_str()) {
            Ok(unescaped) => unescaped.trim().to_string(),
            Err(_) => inner.as_str().trim().to_string(),
        };
        if content.is_empty() {
            continue;
        }

        records.push(EquationRecord::plain(
            content,
            Strategy::InlinePattern,
            whole.start,
        ));
    }

    debug!("Inline pattern scan found {} spans", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(body: &str) -> Vec<String> {
        scan_inline_patterns(&RawXml::new("test.docx", body.to_string()))
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect()
    }

    #[test]
    fn test_dollar_span_in_text_run() {
        let xml = r#"<w:p><w:r><w:t>Einstein: $E=mc^2$</w:t></w:r></w:p>"#;
        assert_eq!(contents(xml), vec!["E=mc^2"]);
    }

    #[test]
    fn test_all_delimiters_in_document_order() {
        let xml = r#"<w:t>$$a+b$$ then \(x_1\) and \[\sum x\] and $y$</w:t>"#;
        assert_eq!(contents(xml), vec!["a+b", "x_1", r"\sum x", "y"]);
    }

    #[test]
    fn test_currency_is_not_math() {
        let xml = r#"<w:t>It costs $5 and $10 today</w:t>"#;
        assert!(contents(xml).is_empty());
    }

    #[test]
    fn test_span_does_not_cross_tags() {
        let xml = r#"<w:t>$a</w:t></w:r><w:r><w:t>b$</w:t>"#;
        assert!(contents(xml).is_empty());
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = r#"<w:t>$a &amp;lt; b$ and $x &lt; y$</w:t>"#;
        assert_eq!(contents(xml), vec!["a &lt; b", "x < y"]);
    }
}
