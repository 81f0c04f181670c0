//! Structured math markup scan
//!
//! Walks the body XML with a namespace-aware reader and cuts out every
//! `oMath` subtree, plus any `oMathPara` that holds no `oMath` of its own.
//! Matching is done on the resolved namespace URI, so documents that bind the
//! math namespace to a prefix other than `m:` are handled the same way.

use log::debug;
use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use std::fmt;

use crate::document::models::{EquationRecord, RawXml, Strategy};
use crate::document::namespaces::{is_math_namespace, prefix_for};
use crate::error::{ExtractError, Result};

const MATH_OBJECT: &[u8] = b"oMath";
const MATH_PARAGRAPH: &[u8] = b"oMathPara";

/// Display paragraph still open in the walk
struct OpenParagraph {
    start: usize,
    holds_math: bool,
}

pub(crate) fn scan_math_markup(xml: &RawXml) -> Result<Vec<EquationRecord>> {
    let source = xml.as_str();
    let mut reader = NsReader::from_str(source);
    // Text is kept so that buffer positions land exactly on tag boundaries
    reader.config_mut().trim_text(false);

    let mut records = Vec::new();
    let mut paragraphs: Vec<OpenParagraph> = Vec::new();
    let mut depth = 0usize;
    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();

    loop {
        let start = reader.buffer_position() as usize;
        let (ns, event) = match reader.read_resolved_event_into(&mut buf) {
            Ok(resolved) => resolved,
            Err(err) => return Err(malformed(reader.error_position(), err)),
        };

        let math_prefix = match ns {
            ResolveResult::Bound(ns) if is_math_namespace(ns.as_ref()) => prefix_for(ns.as_ref()),
            _ => None,
        };
        let is_math = |name: &[u8], local: &[u8]| math_prefix.is_some() && name == local;

        match event {
            Event::Start(ref e) if is_math(e.local_name().as_ref(), MATH_OBJECT) => {
                reader
                    .read_to_end_into(e.name(), &mut skip_buf)
                    .map_err(|err| malformed(reader.error_position(), err))?;
                skip_buf.clear();
                let end = reader.buffer_position() as usize;
                debug!(
                    "Found {}:oMath at byte {start}",
                    math_prefix.unwrap_or("m")
                );
                push_math_object(&mut records, &mut paragraphs, &source[start..end], start);
            }
            Event::Empty(ref e) if is_math(e.local_name().as_ref(), MATH_OBJECT) => {
                let end = reader.buffer_position() as usize;
                push_math_object(&mut records, &mut paragraphs, &source[start..end], start);
            }
            Event::Start(ref e) if is_math(e.local_name().as_ref(), MATH_PARAGRAPH) => {
                depth += 1;
                paragraphs.push(OpenParagraph {
                    start,
                    holds_math: false,
                });
            }
            Event::End(ref e) if is_math(e.local_name().as_ref(), MATH_PARAGRAPH) => {
                depth = depth.saturating_sub(1);
                let end = reader.buffer_position() as usize;
                if let Some(paragraph) = paragraphs.pop() {
                    if !paragraph.holds_math {
                        records.push(EquationRecord::structured(
                            source[paragraph.start..end].to_string(),
                            paragraph.start,
                        ));
                    }
                }
            }
            Event::Empty(ref e) if is_math(e.local_name().as_ref(), MATH_PARAGRAPH) => {
                let end = reader.buffer_position() as usize;
                records.push(EquationRecord::structured(
                    source[start..end].to_string(),
                    start,
                ));
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => {
                if depth != 0 {
                    return Err(malformed(
                        reader.buffer_position(),
                        format!("{depth} element(s) left unclosed"),
                    ));
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    debug!("Math markup scan found {} elements", records.len());
    Ok(records)
}

/// Record a math object; the paragraphs around it are then covered by it
fn push_math_object(
    records: &mut Vec<EquationRecord>,
    paragraphs: &mut [OpenParagraph],
    markup: &str,
    offset: usize,
) {
    for paragraph in paragraphs.iter_mut() {
        paragraph.holds_math = true;
    }
    records.push(EquationRecord::structured(markup.to_string(), offset));
}

fn malformed(position: u64, err: impl fmt::Display) -> ExtractError {
    ExtractError::failure(
        Strategy::MathMarkup,
        format!("malformed XML at byte {position}: {err}"),
    )
}
