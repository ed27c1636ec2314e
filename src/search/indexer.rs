//! Term search over a decoded document, with context per hit.

use std::path::Path;

use serde::Serialize;

use crate::search::{context, AncestorIndex};
use crate::xml::Document;

/// Maximum content snippet length when no single line contains the term.
const SNIPPET_LIMIT: usize = 100;

/// One search hit, annotated with the semantic context inferred from the
/// node's ancestors. Serialized field names match the report's embedded
/// JSON contract (`type` and `line` rather than the Rust field names).
#[derive(Debug, Clone, Serialize)]
pub struct ContextRecord {
    pub workflow: String,
    pub transition: String,
    pub function_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Slash-joined ancestor tag path; attribute hits append `/@{name}`.
    /// Same-tag siblings produce identical paths. Known limitation, kept
    /// so match identities stay stable for existing consumers.
    #[serde(rename = "line")]
    pub location: String,
    pub filename: String,
    pub content: String,
}

/// Search `doc` for `term`, case-insensitively, in text and attribute
/// values. Returns records in document order; at any one node the text hit
/// comes before its attribute hits, attribute hits in attribute order.
pub fn search(doc: &Document, term: &str, filename: &str) -> Vec<ContextRecord> {
    let ancestors = AncestorIndex::build(doc);
    let term_lower = term.to_lowercase();
    let basename = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    let mut records = Vec::new();
    let mut stack = vec![(doc.root(), String::new())];
    while let Some((id, path)) = stack.pop() {
        let elem = doc.node(id);
        let location = if path.is_empty() {
            elem.tag.clone()
        } else {
            format!("{path}/{}", elem.tag)
        };

        if let Some(text) = &elem.text {
            if text.to_lowercase().contains(&term_lower) {
                let ctx = context::resolve(doc, id, &ancestors, filename);
                records.push(ContextRecord {
                    workflow: ctx.workflow,
                    transition: ctx.transition,
                    function_id: ctx.function_id,
                    kind: ctx.kind,
                    location: location.clone(),
                    filename: basename.clone(),
                    content: snippet(text, &term_lower),
                });
            }
        }

        for attr in &elem.attrs {
            if attr.value.to_lowercase().contains(&term_lower) {
                let ctx = context::resolve(doc, id, &ancestors, filename);
                records.push(ContextRecord {
                    workflow: ctx.workflow,
                    transition: ctx.transition,
                    function_id: ctx.function_id,
                    kind: ctx.kind,
                    location: format!("{location}/@{}", attr.name),
                    filename: basename.clone(),
                    content: format!("{}=\"{}\"", attr.name, attr.value),
                });
            }
        }

        for &child in elem.children.iter().rev() {
            stack.push((child, location.clone()));
        }
    }
    records
}

/// The first line of the trimmed text that contains the term, itself
/// trimmed; otherwise the first [`SNIPPET_LIMIT`] characters of the
/// trimmed text.
fn snippet(text: &str, term_lower: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .lines()
        .find(|line| line.to_lowercase().contains(term_lower))
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| trimmed.chars().take(SNIPPET_LIMIT).collect())
}
