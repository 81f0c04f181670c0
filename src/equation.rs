use anyhow::{Result, anyhow, bail};
use log::debug;
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::document::namespaces::{is_math_namespace, is_text_namespace};
use crate::document::{EquationRecord, Extraction};

/// Namespace an element was resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scope {
    Math,
    Text,
    Other,
}

#[derive(Debug, Clone)]
enum OmmlNode {
    Element(OmmlElement),
    Text(String),
}

#[derive(Debug, Clone)]
struct OmmlElement {
    scope: Scope,
    name: String,
    /// Value of the `val` attribute, used by property elements like `m:chr`
    val: Option<String>,
    children: Vec<OmmlNode>,
}

impl OmmlElement {
    fn new(scope: Scope, start: &BytesStart<'_>) -> Self {
        let val = start
            .attributes()
            .flatten()
            .find(|a| a.key.local_name().as_ref() == b"val")
            .map(|a| String::from_utf8_lossy(&a.value).into_owned());

        Self {
            scope,
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            val,
            children: Vec::new(),
        }
    }

    fn root() -> Self {
        Self {
            scope: Scope::Other,
            name: String::new(),
            val: None,
            children: Vec::new(),
        }
    }

    fn is_math(&self, name: &str) -> bool {
        self.scope == Scope::Math && self.name == name
    }

    /// Property containers (`m:fPr`, `m:rPr`, `w:rPr` ...) carry no text
    fn is_properties(&self) -> bool {
        self.name.ends_with("Pr")
    }

    fn elements(&self) -> impl Iterator<Item = &OmmlElement> {
        self.children.iter().filter_map(|c| match c {
            OmmlNode::Element(e) => Some(e),
            OmmlNode::Text(_) => None,
        })
    }

    fn child(&self, name: &str) -> Option<&OmmlElement> {
        self.elements().find(|e| e.is_math(name))
    }

    /// `val` of a property inside this element's `*Pr` container
    fn property(&self, name: &str) -> Option<&str> {
        self.elements()
            .filter(|e| e.is_properties())
            .flat_map(|pr| pr.elements())
            .find(|e| e.is_math(name))
            .and_then(|e| e.val.as_deref())
    }

    fn render_child(&self, name: &str) -> String {
        self.child(name).map(render).unwrap_or_default()
    }
}

/// Reduce an OMML subtree to a readable plain-text approximation
///
/// Only markup whose top-level elements include a math element is rendered;
/// anything else is whitespace-collapsed, so the function is idempotent on its
/// own output. Markup that fails to parse is returned as is.
pub fn normalize(omml: &str) -> String {
    if !omml.trim_start().starts_with('<') {
        return collapse_whitespace(omml);
    }

    match parse_omml_tree(omml) {
        Ok(root) if root.elements().any(|e| e.scope == Scope::Math) => {
            collapse_whitespace(&render_children(&root))
        }
        Ok(_) => collapse_whitespace(omml),
        Err(e) => {
            debug!("Keeping raw equation markup: {e}");
            omml.to_string()
        }
    }
}

/// Normalize a record's content when it holds OMML; other records are returned unchanged
pub fn normalize_record(mut record: EquationRecord) -> EquationRecord {
    if record.is_structured_math {
        record.content = normalize(&record.content);
    }
    record
}

pub fn normalize_extraction(extraction: Extraction) -> Extraction {
    Extraction {
        strategy: extraction.strategy,
        records: extraction
            .records
            .into_iter()
            .map(normalize_record)
            .collect(),
    }
}

/// Parse OMML into an element tree keyed by resolved namespace
fn parse_omml_tree(xml: &str) -> Result<OmmlElement> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack = vec![OmmlElement::root()];

    loop {
        let (ns, event) = match reader.read_resolved_event_into(&mut buf) {
            Ok(resolved) => resolved,
            Err(e) => bail!("OMML parsing error: {}", e),
        };
        let scope = match ns {
            ResolveResult::Bound(ns) if is_math_namespace(ns.as_ref()) => Scope::Math,
            ResolveResult::Bound(ns) if is_text_namespace(ns.as_ref()) => Scope::Text,
            _ => Scope::Other,
        };

        match event {
            Event::Start(ref e) => stack.push(OmmlElement::new(scope, e)),
            Event::Empty(ref e) => {
                let element = OmmlElement::new(scope, e);
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(OmmlNode::Element(element));
                }
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    bail!("Unbalanced end tag in OMML");
                }
                if let (Some(element), Some(parent)) = (stack.pop(), stack.last_mut()) {
                    parent.children.push(OmmlNode::Element(element));
                }
            }
            Event::Text(ref e) => {
                if let Some(current) = stack.last_mut() {
                    // Only `m:t` / `w:t` carry equation text
                    if current.name == "t" && current.scope != Scope::Other {
                        current.children.push(OmmlNode::Text(e.unescape()?.into_owned()));
                    }
                }
            }
            Event::CData(ref e) => {
                if let Some(current) = stack.last_mut() {
                    if current.name == "t" {
                        let text = String::from_utf8_lossy(e).into_owned();
                        current.children.push(OmmlNode::Text(text));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if stack.len() != 1 {
        bail!("Unclosed element in OMML");
    }
    stack.pop().ok_or_else(|| anyhow!("Empty OMML"))
}

fn render_children(element: &OmmlElement) -> String {
    element
        .children
        .iter()
        .map(|child| match child {
            OmmlNode::Text(text) => text.clone(),
            OmmlNode::Element(e) => render(e),
        })
        .collect()
}

/// Render a parsed OMML element to plain text
fn render(element: &OmmlElement) -> String {
    if element.is_properties() {
        return String::new();
    }
    if element.scope != Scope::Math {
        return render_children(element);
    }

    match element.name.as_str() {
        "f" => {
            let num = element.render_child("num");
            let den = element.render_child("den");
            if element.property("type") == Some("noBar") {
                format!("binom({num}, {den})")
            } else {
                format!("{}/{}", group(num), group(den))
            }
        }
        "sSup" => format!(
            "{}^{}",
            group(element.render_child("e")),
            group(element.render_child("sup"))
        ),
        "sSub" => format!(
            "{}_{}",
            group(element.render_child("e")),
            group(element.render_child("sub"))
        ),
        "sSubSup" => format!(
            "{}_{}^{}",
            group(element.render_child("e")),
            group(element.render_child("sub")),
            group(element.render_child("sup"))
        ),
        "sPre" => format!(
            "_{}^{} {}",
            group(element.render_child("sub")),
            group(element.render_child("sup")),
            element.render_child("e")
        ),
        "rad" => {
            let base = element.render_child("e");
            let degree = element.render_child("deg");
            if degree.trim().is_empty() || element.property("degHide") == Some("1") {
                format!("sqrt({base})")
            } else {
                format!("root({degree}, {base})")
            }
        }
        "nary" => {
            // OMML defaults a missing operator to the integral sign
            let mut result = element.property("chr").unwrap_or("∫").to_string();
            let sub = element.render_child("sub");
            let sup = element.render_child("sup");
            if !sub.is_empty() {
                result.push('_');
                result.push_str(&group(sub));
            }
            if !sup.is_empty() {
                result.push('^');
                result.push_str(&group(sup));
            }
            result.push(' ');
            result.push_str(&element.render_child("e"));
            result
        }
        "d" => {
            let open = element.property("begChr").unwrap_or("(");
            let close = element.property("endChr").unwrap_or(")");
            let separator = element.property("sepChr").unwrap_or("|");
            let items: Vec<String> = element
                .elements()
                .filter(|e| e.is_math("e"))
                .map(render)
                .collect();
            format!("{open}{}{close}", items.join(separator))
        }
        "func" => {
            let name = element.render_child("fName");
            let argument = element.render_child("e");
            if is_wrapped(&argument) {
                format!("{name}{argument}")
            } else {
                format!("{name}({argument})")
            }
        }
        "limLow" => format!(
            "{}_{}",
            element.render_child("e"),
            group(element.render_child("lim"))
        ),
        "limUpp" => format!(
            "{}^{}",
            element.render_child("e"),
            group(element.render_child("lim"))
        ),
        "eqArr" => join_rows(element, "e", "; "),
        "m" => {
            let rows: Vec<String> = element
                .elements()
                .filter(|e| e.is_math("mr"))
                .map(|row| join_rows(row, "e", ", "))
                .collect();
            format!("[{}]", rows.join("; "))
        }
        _ => render_children(element),
    }
}

fn join_rows(element: &OmmlElement, name: &str, separator: &str) -> String {
    element
        .elements()
        .filter(|e| e.is_math(name))
        .map(render)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Parenthesize compound operands of `/`, `^` and `_`
fn group(text: String) -> String {
    let simple = text.chars().all(|c| c.is_alphanumeric() || c == '.');
    if simple || is_wrapped(&text) {
        text
    } else {
        format!("({text})")
    }
}

/// True when the first `(` is closed by the final `)`
fn is_wrapped(text: &str) -> bool {
    if !(text.starts_with('(') && text.ends_with(')')) {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i + 1 != text.len() {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
