//! Serializes a document back to XML.
//!
//! Used to write the decoded copy of each processed workflow export. Output
//! carries an XML declaration and escapes markup characters; it makes no
//! attempt to reproduce the original file's whitespace.

use crate::xml::{Document, NodeId};

/// Serialize the whole document, XML declaration included.
pub fn to_xml_string(doc: &Document) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

    enum Step {
        Open(NodeId),
        Close(NodeId),
    }

    let mut stack = vec![Step::Open(doc.root())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => {
                let node = doc.node(id);
                out.push('<');
                out.push_str(&node.tag);
                for attr in &node.attrs {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    push_escaped(&mut out, &attr.value, true);
                    out.push('"');
                }
                if node.text.is_none() && node.children.is_empty() {
                    out.push_str("/>");
                    continue;
                }
                out.push('>');
                stack.push(Step::Close(id));
                for &child in node.children.iter().rev() {
                    stack.push(Step::Open(child));
                }
                if let Some(text) = &node.text {
                    push_escaped(&mut out, text, false);
                }
            }
            Step::Close(id) => {
                out.push_str("</");
                out.push_str(&doc.node(id).tag);
                out.push('>');
            }
        }
    }
    out.push('\n');
    out
}

fn push_escaped(out: &mut String, value: &str, in_attribute: bool) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
