//! Layout inference: the second lowering pass.
//!
//! Attaches exactly one [`LayoutMeta`] to every normalized node,
//! recovering flex-like structure (row/column/stack, gap, padding,
//! alignment, fixed/fill/hug sizing) from explicit auto-layout metadata
//! where present and from absolute positions where not.
//!
//! Construction is strictly top-down: a child's sizing depends on the
//! parent's resolved axis, so a node's own layout is fully resolved
//! before its children are visited, and the parent context parameter is
//! mandatory.

mod constraints;
mod detect;
mod infer;

pub use constraints::{map_constraints, AbsolutePosition, Dimension};
pub use detect::{
    detect_layout_type, ALIGNMENT_TOLERANCE_PX, CENTERING_TOLERANCE_PX, END_LEADING_MIN_PX,
    SPAN_SLACK_PX, STACK_OVERLAP_MIN,
};

use serde::{Deserialize, Serialize};

use crate::ir::geom::{Canvas, Rect};
use crate::normalize::{NodeProps, NormalizedNode};
use crate::raw::{LayoutAlign, LayoutPositioning, OverflowDirection};

use log::trace;

/// The resolved arrangement of a container's children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    Row,
    Column,
    Stack,
    Absolute,
}

impl LayoutType {
    /// Whether children flow along an axis (row or column).
    pub fn is_flow(self) -> bool {
        matches!(self, LayoutType::Row | LayoutType::Column)
    }
}

/// Main-axis distribution of children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MainAlign {
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
}

/// Cross-axis alignment of children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossAlign {
    Start,
    End,
    Center,
    Baseline,
    Stretch,
}

/// How a node sizes itself along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sizing {
    Fixed,
    Fill,
    Hug,
}

/// Per-axis sizing pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSizing {
    pub horizontal: Sizing,
    pub vertical: Sizing,
}

impl Default for AxisSizing {
    fn default() -> Self {
        Self {
            horizontal: Sizing::Fixed,
            vertical: Sizing::Fixed,
        }
    }
}

/// Edge insets between a container and its content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

/// Scroll overflow carried through from the raw frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    Horizontal,
    Vertical,
    Both,
}

/// The layout facts resolved for one node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutMeta {
    pub layout_type: LayoutType,
    pub gap: f64,
    pub padding: Padding,
    pub main_align: MainAlign,
    pub cross_align: CrossAlign,
    pub sizing: AxisSizing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<Overflow>,
    /// Constraint-mapped offsets, present only for absolute children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<AbsolutePosition>,
}

/// The resolved layout context a parent passes to its children.
///
/// The root of the tree has no parent; use [`ParentLayout::root`].
#[derive(Clone, Copy, Debug)]
pub struct ParentLayout {
    pub layout_type: Option<LayoutType>,
    pub bounds: Option<Rect<Canvas>>,
}

impl ParentLayout {
    pub fn root() -> Self {
        Self {
            layout_type: None,
            bounds: None,
        }
    }

    fn of(layout_type: LayoutType, bounds: Option<Rect<Canvas>>) -> Self {
        Self {
            layout_type: Some(layout_type),
            bounds,
        }
    }
}

/// A normalized node with its layout resolved.
#[derive(Clone, Debug)]
pub struct LayoutNode {
    pub props: NodeProps,
    pub layout: LayoutMeta,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    /// Depth-first iteration helper used by detectors.
    pub fn walk(&self, visit: &mut impl FnMut(&LayoutNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Finds a node by id anywhere in this subtree.
    pub fn find(&self, id: &str) -> Option<&LayoutNode> {
        if self.props.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

/// Resolves layout for a whole tree, starting without parent context.
pub fn annotate_tree(root: NormalizedNode) -> LayoutNode {
    annotate(root, ParentLayout::root())
}

/// Resolves one node's layout, then recurses with this node as the
/// parent context.
pub fn annotate(node: NormalizedNode, parent: ParentLayout) -> LayoutNode {
    let NormalizedNode { props, children } = node;

    let layout_type = detect::detect_layout_type(&props, &children);
    let gap = infer::resolve_gap(&props, &children, layout_type);
    let padding = infer::resolve_padding(&props, &children);
    let main_align = infer::resolve_main_align(&props, &children, layout_type);
    let cross_align = infer::resolve_cross_align(&props, &children, layout_type);
    let sizing = infer::resolve_sizing(&props, &parent);
    let overflow = map_overflow(props.overflow_direction);
    let position = resolve_position(&props, &parent);

    trace!(
        "layout: '{}' resolved as {:?} (gap {}, {} children)",
        props.name,
        layout_type,
        gap,
        children.len()
    );

    let child_context = ParentLayout::of(layout_type, props.bounds);
    let children = children
        .into_iter()
        .map(|child| annotate(child, child_context))
        .collect();

    LayoutNode {
        layout: LayoutMeta {
            layout_type,
            gap,
            padding,
            main_align,
            cross_align,
            sizing,
            overflow,
            position,
        },
        props,
        children,
    }
}

/// A node gets constraint-mapped offsets when it opts out of flow
/// explicitly, or when its parent does not lay children out in a flow.
fn resolve_position(props: &NodeProps, parent: &ParentLayout) -> Option<AbsolutePosition> {
    let parent_bounds = parent.bounds?;
    let bounds = props.bounds?;

    let absolute = props.layout_positioning == LayoutPositioning::Absolute
        || !parent.layout_type.is_some_and(LayoutType::is_flow);
    if !absolute {
        return None;
    }

    Some(constraints::map_constraints(
        bounds,
        parent_bounds,
        props.constraints,
    ))
}

fn map_overflow(direction: Option<OverflowDirection>) -> Option<Overflow> {
    match direction? {
        OverflowDirection::HorizontalScrolling => Some(Overflow::Horizontal),
        OverflowDirection::VerticalScrolling => Some(Overflow::Vertical),
        OverflowDirection::HorizontalAndVerticalScrolling => Some(Overflow::Both),
        OverflowDirection::None | OverflowDirection::Unknown => None,
    }
}

/// Whether every child of an auto-layout container stretches across the
/// cross axis. Used by cross-alignment resolution.
pub(crate) fn all_children_stretch(children: &[NormalizedNode]) -> bool {
    !children.is_empty()
        && children
            .iter()
            .all(|c| c.props.layout_align == Some(LayoutAlign::Stretch))
}
