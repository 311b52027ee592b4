//! Semantic classification: the third lowering pass.
//!
//! Reclassifies each layout node into exactly one IR variant. The
//! decision procedure is a first-match-wins cascade; every predicate is
//! a named function so the priority order stays explicit and each rule
//! is testable on its own. Inconclusive nodes fall through to
//! `Container`, never an error.

pub mod content;

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::detect::fingerprint::fingerprint;
use crate::ir::{ComponentKind, IrNode, NodeBase};
use crate::layout::LayoutNode;
use crate::raw::{EffectType, NodeType, PaintType};
use crate::style::sanitize_style_name;

/// Vector clusters at or above this extent stop reading as icons.
pub const ICON_MAX_EXTENT_PX: f64 = 64.0;

/// Minimum corner rounding for a shape to read as button-like.
const BUTTON_MIN_RADIUS_PX: f64 = 4.0;

/// Tallest box that still reads as a button rather than a panel.
const BUTTON_MAX_HEIGHT_PX: f64 = 72.0;

static BUTTON_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(button|btn|cta)\b").expect("static button pattern"));

/// Classifies a whole layout tree into IR, children first.
pub fn recognize(node: &LayoutNode) -> IrNode {
    let children: Vec<IrNode> = node.children.iter().map(recognize).collect();
    let base = make_base(node);

    if let Some(text) = text_leaf(node) {
        let field = content::classify_text(&text);
        return IrNode::Text { base, text, field };
    }
    if let Some(image_ref) = image_leaf(node) {
        return IrNode::Image { base, image_ref };
    }
    if is_icon(node) {
        return IrNode::Icon { base };
    }
    if let Some(label) = button_label(node, &children) {
        trace!("classify: '{}' read as button", node.props.name);
        return IrNode::Button {
            base,
            label,
            label_style_ref: None,
            icon_style_ref: None,
        };
    }
    if is_repeating(&children) {
        trace!(
            "classify: '{}' read as repeater of {} items",
            node.props.name,
            children.len()
        );
        return IrNode::Repeater { base, children };
    }
    if let Some(component_kind) = component_kind(node.props.node_type) {
        return IrNode::Component {
            base,
            component_kind,
            component_key: node.props.component_id.clone(),
            children,
        };
    }
    if is_card(node) {
        return IrNode::Card { base, children };
    }

    IrNode::Container { base, children }
}

fn make_base(node: &LayoutNode) -> NodeBase {
    NodeBase {
        id: node.props.id.clone(),
        name: node.props.name.clone(),
        style_ref: sanitize_style_name(&node.props.name),
        bounds: node.props.bounds_or_zero(),
        layout: node.layout.clone(),
    }
}

/// A pure text leaf: a TEXT node, or any childless node carrying
/// characters.
fn text_leaf(node: &LayoutNode) -> Option<String> {
    if node.props.node_type == NodeType::Text {
        return Some(node.props.characters.clone().unwrap_or_default());
    }
    if node.children.is_empty() {
        return node.props.characters.clone();
    }
    None
}

/// A childless node whose first visible fill is an image.
fn image_leaf(node: &LayoutNode) -> Option<Option<String>> {
    if !node.children.is_empty() {
        return None;
    }
    node.props
        .fills
        .iter()
        .find(|p| p.is_visible() && p.paint_type == PaintType::Image)
        .map(|p| p.image_ref.clone())
}

/// A small cluster made entirely of vector shapes.
fn is_icon(node: &LayoutNode) -> bool {
    let Some(bounds) = node.props.bounds else {
        return false;
    };
    if bounds.width >= ICON_MAX_EXTENT_PX || bounds.height >= ICON_MAX_EXTENT_PX {
        return false;
    }
    is_vector_cluster(node)
}

fn is_vector_cluster(node: &LayoutNode) -> bool {
    if node.props.node_type.is_vector() {
        return true;
    }
    !node.children.is_empty() && node.children.iter().all(is_vector_cluster)
}

/// A container with exactly one label child (plus at most one icon)
/// and button-like naming or shape. Returns the label text on match.
fn button_label(node: &LayoutNode, children: &[IrNode]) -> Option<Option<String>> {
    if children.is_empty() {
        return None;
    }

    let mut label: Option<String> = None;
    let mut icon_count = 0;
    for child in children {
        match child {
            IrNode::Text { text, .. } => {
                if label.is_some() {
                    return None; // two labels: not a button
                }
                label = Some(text.clone());
            }
            IrNode::Icon { .. } => icon_count += 1,
            _ => return None,
        }
    }
    if label.is_none() || icon_count > 1 {
        return None;
    }

    if has_buttonish_name(&node.props.name) || has_buttonish_shape(node) {
        Some(label)
    } else {
        None
    }
}

fn has_buttonish_name(name: &str) -> bool {
    BUTTON_NAME.is_match(name)
}

fn has_buttonish_shape(node: &LayoutNode) -> bool {
    let rounded = node
        .props
        .corner_radius
        .is_some_and(|r| r >= BUTTON_MIN_RADIUS_PX);
    let filled = node.props.first_visible_solid_fill().is_some();
    let short = node
        .props
        .bounds
        .is_some_and(|b| b.height > 0.0 && b.height <= BUTTON_MAX_HEIGHT_PX);
    rounded && filled && short
}

/// Two or more children sharing one structural fingerprint, where the
/// template is itself structured (bare leaf runs are left to the list
/// detector).
fn is_repeating(children: &[IrNode]) -> bool {
    if children.len() < 2 {
        return false;
    }
    if children[0].children().is_empty() {
        return false;
    }
    let template = fingerprint(&children[0]);
    children[1..].iter().all(|c| fingerprint(c) == template)
}

fn component_kind(node_type: NodeType) -> Option<ComponentKind> {
    match node_type {
        NodeType::Component => Some(ComponentKind::Definition),
        NodeType::ComponentSet => Some(ComponentKind::Set),
        NodeType::Instance => Some(ComponentKind::Instance),
        _ => None,
    }
}

/// A rounded box with a shadow or border reads as a card.
fn is_card(node: &LayoutNode) -> bool {
    if node.props.node_type.is_vector() {
        return false;
    }

    let rounded = node.props.corner_radius.is_some_and(|r| r > 0.0)
        || node
            .props
            .rectangle_corner_radii
            .is_some_and(|radii| radii.iter().any(|r| *r > 0.0));
    if !rounded {
        return false;
    }

    let shadowed = node.props.effects.iter().any(|e| {
        e.is_visible()
            && matches!(
                e.effect_type,
                EffectType::DropShadow | EffectType::InnerShadow
            )
    });
    let bordered = node.props.strokes.iter().any(|s| s.is_visible());
    shadowed || bordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::geom::Rect;
    use crate::layout::annotate_tree;
    use crate::normalize::NormalizedNode;
    use crate::raw::{ColorRgba, Effect, Paint};

    fn node(id: &str, name: &str, node_type: NodeType) -> NormalizedNode {
        let mut n = NormalizedNode::empty_container(id, name);
        n.props.node_type = node_type;
        n.props.bounds = Some(Rect::new(0.0, 0.0, 100.0, 40.0));
        n
    }

    fn solid_fill() -> Paint {
        Paint {
            paint_type: PaintType::Solid,
            color: Some(ColorRgba {
                r: 0.1,
                g: 0.4,
                b: 0.9,
                a: 1.0,
            }),
            ..Default::default()
        }
    }

    fn classify(tree: NormalizedNode) -> IrNode {
        recognize(&annotate_tree(tree))
    }

    #[test]
    fn test_text_leaf() {
        let mut n = node("1", "Title", NodeType::Text);
        n.props.characters = Some("$42.00".into());
        let ir = classify(n);
        match ir {
            IrNode::Text { text, field, .. } => {
                assert_eq!(text, "$42.00");
                assert_eq!(field, Some(crate::ir::FieldKind::Price));
            }
            other => panic!("expected Text, got {}", other.kind_str()),
        }
    }

    #[test]
    fn test_image_leaf() {
        let mut n = node("1", "Hero", NodeType::Rectangle);
        n.props.fills = vec![Paint {
            paint_type: PaintType::Image,
            image_ref: Some("img-abc".into()),
            ..Default::default()
        }];
        let ir = classify(n);
        match ir {
            IrNode::Image { image_ref, .. } => assert_eq!(image_ref.as_deref(), Some("img-abc")),
            other => panic!("expected Image, got {}", other.kind_str()),
        }
    }

    #[test]
    fn test_small_vector_is_icon_large_is_not() {
        let mut small = node("1", "chevron", NodeType::Vector);
        small.props.bounds = Some(Rect::new(0.0, 0.0, 24.0, 24.0));
        assert_eq!(classify(small).kind_str(), "icon");

        let mut large = node("2", "illustration", NodeType::Vector);
        large.props.bounds = Some(Rect::new(0.0, 0.0, 240.0, 180.0));
        assert_ne!(classify(large).kind_str(), "icon");
    }

    #[test]
    fn test_frame_of_vectors_is_icon() {
        let mut wrapper = node("1", "icon/settings", NodeType::Frame);
        wrapper.props.bounds = Some(Rect::new(0.0, 0.0, 24.0, 24.0));
        let mut gear = node("2", "gear", NodeType::BooleanOperation);
        gear.props.bounds = Some(Rect::new(2.0, 2.0, 20.0, 20.0));
        wrapper.children.push(gear);
        assert_eq!(classify(wrapper).kind_str(), "icon");
    }

    #[test]
    fn test_button_by_name() {
        let mut btn = node("1", "Primary Button", NodeType::Frame);
        let mut label = node("2", "Label", NodeType::Text);
        label.props.characters = Some("Pay now".into());
        label.props.bounds = Some(Rect::new(10.0, 10.0, 80.0, 20.0));
        btn.children.push(label);

        match classify(btn) {
            IrNode::Button { label, .. } => assert_eq!(label.as_deref(), Some("Pay now")),
            other => panic!("expected Button, got {}", other.kind_str()),
        }
    }

    #[test]
    fn test_button_by_shape() {
        let mut btn = node("1", "Action", NodeType::Frame);
        btn.props.corner_radius = Some(8.0);
        btn.props.fills = vec![solid_fill()];
        let mut label = node("2", "Label", NodeType::Text);
        label.props.characters = Some("Continue".into());
        label.props.bounds = Some(Rect::new(10.0, 10.0, 80.0, 20.0));
        btn.children.push(label);

        assert_eq!(classify(btn).kind_str(), "button");
    }

    #[test]
    fn test_two_texts_are_not_a_button() {
        let mut frame = node("1", "Submit Button", NodeType::Frame);
        for (id, y) in [("2", 0.0), ("3", 22.0)] {
            let mut label = node(id, "Label", NodeType::Text);
            label.props.characters = Some("text".into());
            label.props.bounds = Some(Rect::new(0.0, y, 80.0, 20.0));
            frame.children.push(label);
        }
        assert_ne!(classify(frame).kind_str(), "button");
    }

    #[test]
    fn test_repeated_structures_become_repeater() {
        let mut list = node("1", "Rows", NodeType::Frame);
        list.props.bounds = Some(Rect::new(0.0, 0.0, 200.0, 200.0));
        for (i, y) in [(0, 0.0), (1, 70.0), (2, 140.0)] {
            let mut row = node(&format!("row-{}", i), "Row", NodeType::Frame);
            row.props.bounds = Some(Rect::new(0.0, y, 200.0, 60.0));
            let mut label = node(&format!("label-{}", i), "Label", NodeType::Text);
            label.props.characters = Some(format!("Item {}", i));
            label.props.bounds = Some(Rect::new(8.0, y + 8.0, 100.0, 20.0));
            row.children.push(label);
            list.children.push(row);
        }

        match classify(list) {
            IrNode::Repeater { children, .. } => assert_eq!(children.len(), 3),
            other => panic!("expected Repeater, got {}", other.kind_str()),
        }
    }

    #[test]
    fn test_component_kinds() {
        assert_eq!(classify(node("1", "Chip", NodeType::Component)).kind_str(), "component");
        assert_eq!(
            classify(node("2", "Chip Set", NodeType::ComponentSet)).kind_str(),
            "component"
        );
        assert_eq!(
            classify(node("3", "Chip Instance", NodeType::Instance)).kind_str(),
            "component"
        );
    }

    #[test]
    fn test_rounded_shadowed_frame_is_card() {
        let mut card = node("1", "Summary", NodeType::Frame);
        card.props.corner_radius = Some(12.0);
        card.props.effects = vec![Effect {
            effect_type: EffectType::DropShadow,
            radius: 8.0,
            ..Default::default()
        }];
        assert_eq!(classify(card).kind_str(), "card");
    }

    #[test]
    fn test_plain_frame_falls_through_to_container() {
        assert_eq!(classify(node("1", "Section", NodeType::Frame)).kind_str(), "container");
    }
}
