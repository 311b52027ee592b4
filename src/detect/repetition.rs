//! Repetition detection.
//!
//! Groups Container, Card and Button nodes across the whole tree by
//! structural fingerprint. Any group of two or more becomes a component
//! candidate, with the per-instance text values merged by structural
//! position so code generation can turn them into props.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::fingerprint::fingerprint;
use crate::ir::IrNode;

/// One detected repeated block.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComponentHint {
    /// PascalCase name derived from the first instance.
    pub component_name: String,
    pub instance_ids: Vec<String>,
    /// Per-instance text values, keyed by structural slot
    /// (`text0`, `text1`, ... in document order; `label` for buttons).
    pub props_variations: Vec<BTreeMap<String, String>>,
}

/// Detects repeated blocks tree-wide. Never emits a hint for a group
/// of one.
pub fn detect_repetition(root: &IrNode) -> Vec<ComponentHint> {
    // First-seen order of fingerprints keeps the output deterministic.
    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, Vec<&IrNode>> = BTreeMap::new();

    collect_candidates(root, &mut order, &mut groups);

    let mut hints = Vec::new();
    for key in order {
        let group = &groups[&key];
        if group.len() < 2 {
            continue;
        }

        debug!(
            "repetition: {} instances of fingerprint {}",
            group.len(),
            key
        );
        hints.push(ComponentHint {
            component_name: component_name_of(group[0]),
            instance_ids: group.iter().map(|n| n.base().id.clone()).collect(),
            props_variations: group.iter().map(|n| text_slots(n)).collect(),
        });
    }
    hints
}

fn collect_candidates<'a>(
    node: &'a IrNode,
    order: &mut Vec<String>,
    groups: &mut BTreeMap<String, Vec<&'a IrNode>>,
) {
    if is_candidate(node) {
        let key = fingerprint(node);
        let entry = groups.entry(key.clone()).or_default();
        if entry.is_empty() {
            order.push(key);
        }
        entry.push(node);
    }
    for child in node.children() {
        collect_candidates(child, order, groups);
    }
}

/// Only structured blocks are component candidates; text runs and
/// icons repeat constantly without meaning anything.
fn is_candidate(node: &IrNode) -> bool {
    match node {
        IrNode::Container { children, .. } | IrNode::Card { children, .. } => !children.is_empty(),
        IrNode::Button { .. } => true,
        IrNode::Text { .. }
        | IrNode::Image { .. }
        | IrNode::Icon { .. }
        | IrNode::Repeater { .. }
        | IrNode::Component { .. } => false,
    }
}

/// PascalCase of the first instance's name, with a fallback.
fn component_name_of(node: &IrNode) -> String {
    let name = node.base().name.trim();
    if name.is_empty() {
        return "Component".to_string();
    }

    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Extracts text values by structural position, in document order.
fn text_slots(node: &IrNode) -> BTreeMap<String, String> {
    let mut slots = BTreeMap::new();
    let mut index = 0;
    node.walk(&mut |n| match n {
        IrNode::Text { text, .. } => {
            slots.insert(format!("text{}", index), text.clone());
            index += 1;
        }
        IrNode::Button {
            label: Some(label), ..
        } => {
            slots.insert("label".to_string(), label.clone());
        }
        _ => {}
    });
    slots
}
