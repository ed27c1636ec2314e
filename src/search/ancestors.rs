//! Child-to-parent back references for upward context walks.

use crate::xml::{Document, NodeId};

/// Maps every element of one document snapshot to its immediate parent.
///
/// This is a back-reference structure only; ownership stays strictly
/// parent-to-child inside the [`Document`] arena. An index is valid for
/// exactly the tree shape it was built from: build it once per pass and
/// pass it down rather than rebuilding per node.
#[derive(Debug)]
pub struct AncestorIndex {
    parents: Vec<Option<NodeId>>,
}

impl AncestorIndex {
    /// Build the index with a single traversal. The root maps to `None`.
    pub fn build(doc: &Document) -> Self {
        let mut parents = vec![None; doc.len()];
        let mut stack = vec![doc.root()];
        while let Some(id) = stack.pop() {
            for &child in &doc.node(id).children {
                parents[child as usize] = Some(id);
                stack.push(child);
            }
        }
        Self { parents }
    }

    /// The immediate parent of `id`, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id as usize).copied().flatten()
    }
}
