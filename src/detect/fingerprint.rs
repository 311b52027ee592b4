//! Structural fingerprints.
//!
//! A fingerprint is a recursive signature of a subtree's semantic
//! shape, independent of text content or styling. Two subtrees with the
//! same fingerprint are structurally interchangeable, which is what the
//! list and repetition detectors key on.

use crate::ir::IrNode;

/// Computes the structural fingerprint of a subtree.
///
/// Leaves collapse to their variant name; interior nodes append their
/// children's fingerprints in document order, e.g.
/// `container[image,container[text,text]]`.
pub fn fingerprint(node: &IrNode) -> String {
    let children = node.children();
    if children.is_empty() {
        return node.kind_str().to_string();
    }

    let inner: Vec<String> = children.iter().map(fingerprint).collect();
    format!("{}[{}]", node.kind_str(), inner.join(","))
}
