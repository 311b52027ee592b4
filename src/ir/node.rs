//! Semantic node model for the framelift IR.
//!
//! This is the central output type of the lowering pipeline: every
//! surviving design node is reclassified into exactly one semantic
//! variant. The union is closed on purpose — adding a variant forces a
//! compile-time audit of every consumer match.

use serde::{Deserialize, Serialize};

use super::geom::{Canvas, Rect};
use crate::layout::LayoutMeta;

/// Fields shared by every IR variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeBase {
    /// Source node id, stable across the pipeline.
    pub id: String,

    /// Source node name, kept for naming and hints.
    pub name: String,

    /// Key into the co-produced styles bundle. Always resolves after
    /// style extraction; the extractor may rewrite it during
    /// deduplication.
    pub style_ref: String,

    /// Document-absolute bounds.
    pub bounds: Rect<Canvas>,

    /// The layout facts resolved for this node.
    pub layout: LayoutMeta,
}

/// What role a component-system node plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Definition,
    Set,
    Instance,
}

/// A recognized content field in a text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Price,
    Amount,
    CardBrand,
    CardLastDigits,
    Date,
    Phone,
    Percentage,
}

/// A semantically classified node.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IrNode {
    /// Generic grouping node; the fallback variant.
    Container {
        #[serde(flatten)]
        base: NodeBase,
        children: Vec<IrNode>,
    },

    /// A text run, with its recognized content field if any.
    Text {
        #[serde(flatten)]
        base: NodeBase,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<FieldKind>,
    },

    /// A node rendered entirely by an image fill.
    Image {
        #[serde(flatten)]
        base: NodeBase,
        #[serde(skip_serializing_if = "Option::is_none")]
        image_ref: Option<String>,
    },

    /// A small vector cluster.
    Icon {
        #[serde(flatten)]
        base: NodeBase,
    },

    /// An interactive control with a label and optional icon. The
    /// secondary style refs are registered by the style extractor.
    Button {
        #[serde(flatten)]
        base: NodeBase,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        label_style_ref: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon_style_ref: Option<String>,
    },

    /// A visually framed grouping (rounded box with shadow or border).
    Card {
        #[serde(flatten)]
        base: NodeBase,
        children: Vec<IrNode>,
    },

    /// A container whose children repeat one structural template.
    /// `children[0]` is the homogeneous item template.
    Repeater {
        #[serde(flatten)]
        base: NodeBase,
        children: Vec<IrNode>,
    },

    /// A component definition, set or instance.
    Component {
        #[serde(flatten)]
        base: NodeBase,
        component_kind: ComponentKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        component_key: Option<String>,
        children: Vec<IrNode>,
    },
}

impl IrNode {
    /// Shared fields, immutably.
    pub fn base(&self) -> &NodeBase {
        match self {
            IrNode::Container { base, .. }
            | IrNode::Text { base, .. }
            | IrNode::Image { base, .. }
            | IrNode::Icon { base }
            | IrNode::Button { base, .. }
            | IrNode::Card { base, .. }
            | IrNode::Repeater { base, .. }
            | IrNode::Component { base, .. } => base,
        }
    }

    /// Shared fields, mutably. Used by the style extractor to rewrite
    /// `style_ref` during deduplication.
    pub fn base_mut(&mut self) -> &mut NodeBase {
        match self {
            IrNode::Container { base, .. }
            | IrNode::Text { base, .. }
            | IrNode::Image { base, .. }
            | IrNode::Icon { base }
            | IrNode::Button { base, .. }
            | IrNode::Card { base, .. }
            | IrNode::Repeater { base, .. }
            | IrNode::Component { base, .. } => base,
        }
    }

    /// Child nodes, or an empty slice for leaf variants.
    pub fn children(&self) -> &[IrNode] {
        match self {
            IrNode::Container { children, .. }
            | IrNode::Card { children, .. }
            | IrNode::Repeater { children, .. }
            | IrNode::Component { children, .. } => children,
            IrNode::Text { .. }
            | IrNode::Image { .. }
            | IrNode::Icon { .. }
            | IrNode::Button { .. } => &[],
        }
    }

    /// Child nodes, mutably.
    pub fn children_mut(&mut self) -> &mut [IrNode] {
        match self {
            IrNode::Container { children, .. }
            | IrNode::Card { children, .. }
            | IrNode::Repeater { children, .. }
            | IrNode::Component { children, .. } => children,
            IrNode::Text { .. }
            | IrNode::Image { .. }
            | IrNode::Icon { .. }
            | IrNode::Button { .. } => &mut [],
        }
    }

    /// Stable lowercase name of the variant, used by structural
    /// fingerprints and reports.
    pub fn kind_str(&self) -> &'static str {
        match self {
            IrNode::Container { .. } => "container",
            IrNode::Text { .. } => "text",
            IrNode::Image { .. } => "image",
            IrNode::Icon { .. } => "icon",
            IrNode::Button { .. } => "button",
            IrNode::Card { .. } => "card",
            IrNode::Repeater { .. } => "repeater",
            IrNode::Component { .. } => "component",
        }
    }

    /// Depth-first walk in document order.
    pub fn walk(&self, visit: &mut impl FnMut(&IrNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Depth-first mutable walk in document order.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut IrNode)) {
        visit(self);
        for child in self.children_mut() {
            child.walk_mut(visit);
        }
    }
}
