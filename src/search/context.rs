//! Derives workflow context for a node from its ancestor chain.

use std::path::Path;

use crate::search::AncestorIndex;
use crate::xml::{Document, NodeId};

/// Sentinel for "no ancestor supplied this field". Distinct from the empty
/// string, which real ancestor content could produce.
pub const NOT_AVAILABLE: &str = "N/A";

/// Tags (substring match) that identify a function-like ancestor.
const FUNCTION_TAGS: &[&str] = &["function", "validator", "condition", "post-function"];

/// Semantic context for one node: which workflow, transition, and function
/// the node sits under, plus what kind of node it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub workflow: String,
    pub transition: String,
    pub function_id: String,
    pub kind: String,
}

/// Resolve context for `node` by walking upward through `ancestors`.
///
/// The walk starts at the node itself and continues to the root, inspecting
/// each tag case-insensitively:
///
/// - `action`: transition takes the `name` attribute, or `Action-{id}` when
///   only `id` exists. Reassigned on every match, so the outermost matching
///   ancestor wins.
/// - function-like tags ([`FUNCTION_TAGS`]): function id comes from the
///   `type`, `class`, or `name` attribute (last `.`-separated segment when
///   dotted), or the tag itself when none exist. Also reassigned on every
///   match.
/// - `step`: sets `Step: {name}` only while the transition is still
///   [`NOT_AVAILABLE`], so the innermost step wins.
///
/// The overwrite asymmetry between the step rule and the other two is
/// long-standing observed behavior and is pinned by a regression test; do
/// not make the rules uniform without checking downstream consumers.
pub fn resolve(
    doc: &Document,
    node: NodeId,
    ancestors: &AncestorIndex,
    source_name: &str,
) -> Context {
    let elem = doc.node(node);
    let kind = if elem.tag == "arg" {
        elem.attr("name").unwrap_or(&elem.tag).to_string()
    } else {
        elem.tag.clone()
    };

    let mut context = Context {
        workflow: workflow_name(source_name),
        transition: NOT_AVAILABLE.to_string(),
        function_id: NOT_AVAILABLE.to_string(),
        kind,
    };

    let mut current = Some(node);
    while let Some(id) = current {
        let elem = doc.node(id);
        let tag = elem.tag.to_lowercase();

        if tag.contains("action") {
            if let Some(name) = elem.non_empty_attr("name") {
                context.transition = name.to_string();
            } else if let Some(id) = elem.non_empty_attr("id") {
                context.transition = format!("Action-{id}");
            }
        } else if FUNCTION_TAGS.iter().any(|t| tag.contains(t)) {
            let candidate = elem
                .non_empty_attr("type")
                .or_else(|| elem.non_empty_attr("class"))
                .or_else(|| elem.non_empty_attr("name"));
            context.function_id = match candidate {
                Some(value) => value
                    .rsplit('.')
                    .next()
                    .unwrap_or(value)
                    .to_string(),
                None => elem.tag.clone(),
            };
        } else if tag.contains("step") {
            if let Some(name) = elem.non_empty_attr("name") {
                if context.transition == NOT_AVAILABLE {
                    context.transition = format!("Step: {name}");
                }
            }
        }

        current = ancestors.parent(id);
    }

    context
}

/// The workflow name is the source identifier minus directories and the
/// file-type suffix. Derived once from the identifier, never from tree
/// content.
fn workflow_name(source_name: &str) -> String {
    let path = Path::new(source_name);
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_name.to_string())
}
