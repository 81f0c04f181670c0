//! Well-known OOXML namespaces
//!
//! Element matching is always done on the resolved URI. The prefixes here are
//! only the conventional ones Word writes and are used for reporting.

pub const WORDPROCESSINGML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const MATH: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";
pub const MATH_STRICT: &str = "http://purl.oclc.org/ooxml/officeDocument/math";
pub const WORDPROCESSINGML_STRICT: &str = "http://purl.oclc.org/ooxml/wordprocessingml/main";

pub const NAMESPACES: &[(&str, &str)] = &[
    ("w", WORDPROCESSINGML),
    ("m", MATH),
    (
        "mc",
        "http://schemas.openxmlformats.org/markup-compatibility/2006",
    ),
    ("o", "urn:schemas-microsoft-com:office:office"),
    ("v", "urn:schemas-microsoft-com:vml"),
    (
        "r",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
    ),
    (
        "wp",
        "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing",
    ),
];

const MATH_NAMESPACES: &[&str] = &[MATH, MATH_STRICT];
const TEXT_NAMESPACES: &[&str] = &[WORDPROCESSINGML, WORDPROCESSINGML_STRICT];

pub fn is_math_namespace(uri: &[u8]) -> bool {
    MATH_NAMESPACES.iter().any(|ns| ns.as_bytes() == uri)
}

pub fn is_text_namespace(uri: &[u8]) -> bool {
    TEXT_NAMESPACES.iter().any(|ns| ns.as_bytes() == uri)
}

/// Conventional prefix for a namespace URI
pub fn prefix_for(uri: &[u8]) -> Option<&'static str> {
    if uri == MATH_STRICT.as_bytes() {
        return Some("m");
    }
    NAMESPACES
        .iter()
        .find(|(_, ns)| ns.as_bytes() == uri)
        .map(|(prefix, _)| *prefix)
}
