//! List detection.
//!
//! A container whose children all share one structural fingerprint, in
//! sufficient number, is reported as a list candidate. The hint never
//! mutates the IR; code generation decides what to do with it.

use serde::{Deserialize, Serialize};

use super::fingerprint::fingerprint;
use crate::ir::IrNode;
use crate::layout::LayoutType;

/// Fewest structurally identical children that read as a list. Two
/// identical siblings are a repetition, not a collection.
pub const MIN_LIST_ITEMS: usize = 3;

/// Flow direction of a detected list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One detected list candidate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListHint {
    pub container_id: String,
    pub item_ids: Vec<String>,
    pub orientation: Orientation,
    /// Variant name of the repeated item template.
    pub item_type: String,
}

/// Walks the IR and reports every container whose children form a
/// homogeneous run of at least [`MIN_LIST_ITEMS`].
pub fn detect_lists(root: &IrNode) -> Vec<ListHint> {
    let mut hints = Vec::new();
    root.walk(&mut |node| {
        if let Some(hint) = list_candidate(node) {
            hints.push(hint);
        }
    });
    hints
}

fn list_candidate(node: &IrNode) -> Option<ListHint> {
    let children = node.children();
    if children.len() < MIN_LIST_ITEMS {
        return None;
    }

    let template = fingerprint(&children[0]);
    if !children[1..].iter().all(|c| fingerprint(c) == template) {
        return None;
    }

    let orientation = match node.base().layout.layout_type {
        LayoutType::Row => Orientation::Horizontal,
        LayoutType::Column | LayoutType::Stack | LayoutType::Absolute => Orientation::Vertical,
    };

    Some(ListHint {
        container_id: node.base().id.clone(),
        item_ids: children.iter().map(|c| c.base().id.clone()).collect(),
        orientation,
        item_type: children[0].kind_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::geom::Rect;
    use crate::ir::NodeBase;
    use crate::layout::{
        AxisSizing, CrossAlign, LayoutMeta, LayoutType, MainAlign, Padding,
    };

    fn base_with_layout(id: &str, layout_type: LayoutType) -> NodeBase {
        NodeBase {
            id: id.into(),
            name: id.into(),
            style_ref: id.into(),
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            layout: LayoutMeta {
                layout_type,
                gap: 0.0,
                padding: Padding::default(),
                main_align: MainAlign::Start,
                cross_align: CrossAlign::Start,
                sizing: AxisSizing::default(),
                overflow: None,
                position: None,
            },
        }
    }

    fn text(id: &str) -> IrNode {
        IrNode::Text {
            base: base_with_layout(id, LayoutType::Absolute),
            text: format!("item {}", id),
            field: None,
        }
    }

    fn row_of(id: &str, layout_type: LayoutType, children: Vec<IrNode>) -> IrNode {
        IrNode::Container {
            base: base_with_layout(id, layout_type),
            children,
        }
    }

    #[test]
    fn test_homogeneous_column_is_a_vertical_list() {
        let tree = row_of(
            "list",
            LayoutType::Column,
            vec![text("a"), text("b"), text("c")],
        );
        let hints = detect_lists(&tree);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].container_id, "list");
        assert_eq!(hints[0].item_ids, vec!["a", "b", "c"]);
        assert_eq!(hints[0].orientation, Orientation::Vertical);
        assert_eq!(hints[0].item_type, "text");
    }

    #[test]
    fn test_row_orientation_follows_layout() {
        let tree = row_of(
            "chips",
            LayoutType::Row,
            vec![text("a"), text("b"), text("c")],
        );
        let hints = detect_lists(&tree);
        assert_eq!(hints[0].orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_two_items_are_not_a_list() {
        let tree = row_of("pair", LayoutType::Column, vec![text("a"), text("b")]);
        assert!(detect_lists(&tree).is_empty());
    }

    #[test]
    fn test_mixed_children_are_not_a_list() {
        let heterogeneous = row_of(
            "mixed",
            LayoutType::Column,
            vec![
                text("a"),
                text("b"),
                IrNode::Icon {
                    base: base_with_layout("i", LayoutType::Absolute),
                },
            ],
        );
        assert!(detect_lists(&heterogeneous).is_empty());
    }

    #[test]
    fn test_absence_is_empty_not_error() {
        let leaf = text("only");
        assert!(detect_lists(&leaf).is_empty());
    }
}
