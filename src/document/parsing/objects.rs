//! Embedded equation object references
//!
//! Equations made with the legacy Equation Editor or MathType are stored as
//! OLE objects. The body only carries an `o:OLEObject` tag that points at the
//! binary part, so all we can report is where the object sits.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::document::models::{EquationRecord, RawXml, Strategy};
use crate::error::Result;

static OLE_OBJECT_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:[A-Za-z_][\w.-]*:)?OLEObject\b[^>]*>").expect("valid OLE object pattern")
});

static PROG_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bProgID\s*=\s*"([^"]*)""#).expect("valid ProgID pattern"));

static OBJECT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bObjectID\s*=\s*"([^"]*)""#).expect("valid ObjectID pattern"));

/// ProgIDs registered by equation editors (Equation.3, Equation.DSMT4, MathType ...)
fn is_equation_prog_id(prog_id: &str) -> bool {
    prog_id.starts_with("Equation.") || prog_id.to_ascii_lowercase().starts_with("mathtype")
}

pub(crate) fn scan_object_references(xml: &RawXml) -> Result<Vec<EquationRecord>> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for tag in OLE_OBJECT_TAG.find_iter(xml.as_str()) {
        let Some(prog_id) = PROG_ID.captures(tag.as_str()).map(|c| c[1].to_string()) else {
            continue;
        };
        if !is_equation_prog_id(&prog_id) {
            debug!("Skipping OLE object {prog_id} at byte {}", tag.start());
            continue;
        }

        let key = OBJECT_ID
            .captures(tag.as_str())
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| tag.start().to_string());
        if !seen.insert(key) {
            continue;
        }

        records.push(EquationRecord::plain(
            format!(
                "[embedded equation object {prog_id} at offset {}]",
                tag.start()
            ),
            Strategy::ObjectReference,
            tag.start(),
        ));
    }

    debug!("Equation object scan found {} references", records.len());
    Ok(records)
}
