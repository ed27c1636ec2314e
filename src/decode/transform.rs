//! In-place decoding pass over a parsed document.

use crate::decode::{classifier, decoder, pattern};
use crate::xml::Document;

/// Decode every base64 payload found in the document's text and attribute
/// values, mutating the tree in place.
///
/// Traversal is pre-order, self before children, children in document order,
/// driven by an explicit stack so depth is bounded by memory rather than the
/// call stack. Each value gets one of two mutually exclusive treatments:
/// marker extraction when a marker syntax is present, otherwise a whole-value
/// base64 check. Structure is never changed, so the pass is idempotent once
/// no base64-looking values remain.
pub fn transform(doc: &mut Document) {
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        let node = doc.node_mut(id);

        if let Some(text) = node.text.as_mut() {
            if !text.trim().is_empty() {
                if let Some(decoded) = decoded_value(text.trim()) {
                    *text = decoded;
                }
            }
        }

        for attr in node.attrs.iter_mut() {
            if let Some(decoded) = decoded_value(&attr.value) {
                attr.value = decoded;
            }
        }

        // Reverse push keeps document order on a LIFO stack.
        for &child in node.children.iter().rev() {
            stack.push(child);
        }
    }
}

/// The two-branch decode rule shared by text and attribute values. Marker
/// extraction wins when a marker is present; the whole-value base64 check
/// only runs otherwise. `None` means the value is left untouched.
fn decoded_value(value: &str) -> Option<String> {
    if pattern::contains_pattern(value) {
        Some(pattern::extract_and_decode(value))
    } else if classifier::is_base64(value) {
        Some(decoder::decode(value))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_str;

    #[test]
    fn decodes_whole_text_payloads() {
        let mut doc = parse_str("<workflow><results>SGVsbG8=</results></workflow>").unwrap();
        transform(&mut doc);
        let results = doc.node(doc.node(doc.root()).children[0]);
        assert_eq!(results.text.as_deref(), Some("Hello"));
    }

    #[test]
    fn decodes_attribute_payloads() {
        let mut doc = parse_str(r#"<step name="InProgress" desc="cGVuZGluZw=="/>"#).unwrap();
        transform(&mut doc);
        let step = doc.node(doc.root());
        assert_eq!(step.attr("desc"), Some("pending"));
        assert_eq!(step.attr("name"), Some("InProgress"));
    }

    #[test]
    fn marker_extraction_takes_precedence() {
        let mut doc = parse_str("<a>note `!`SGVsbG8=`!` end</a>").unwrap();
        transform(&mut doc);
        assert_eq!(
            doc.node(doc.root()).text.as_deref(),
            Some("note Hello end")
        );
    }

    #[test]
    fn plain_text_is_left_alone() {
        let mut doc = parse_str(r#"<a note="just words">seven letters</a>"#).unwrap();
        transform(&mut doc);
        let root = doc.node(doc.root());
        assert_eq!(root.text.as_deref(), Some("seven letters"));
        assert_eq!(root.attr("note"), Some("just words"));
    }

    #[test]
    fn recurses_into_all_children() {
        let mut doc = parse_str(
            "<workflow><steps><step><meta>SGVsbG8=</meta></step></steps><actions><action arg=\"d29ybGQ=\"/></actions></workflow>",
        )
        .unwrap();
        transform(&mut doc);
        let root = doc.node(doc.root());
        let steps = doc.node(root.children[0]);
        let step = doc.node(steps.children[0]);
        let meta = doc.node(step.children[0]);
        assert_eq!(meta.text.as_deref(), Some("Hello"));
        let actions = doc.node(root.children[1]);
        let action = doc.node(actions.children[0]);
        assert_eq!(action.attr("arg"), Some("world"));
    }

    #[test]
    fn transform_is_idempotent_on_decoded_trees() {
        let mut doc =
            parse_str(r#"<workflow note="plain note"><results>just some words.</results></workflow>"#)
                .unwrap();
        transform(&mut doc);
        let once: Vec<_> = snapshot(&doc);
        transform(&mut doc);
        assert_eq!(snapshot(&doc), once);
    }

    fn snapshot(doc: &crate::xml::Document) -> Vec<String> {
        (0..doc.len() as u32)
            .map(|id| {
                let n = doc.node(id);
                format!("{}|{:?}|{:?}", n.tag, n.text, n.attrs)
            })
            .collect()
    }
}
