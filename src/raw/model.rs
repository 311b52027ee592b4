//! Raw document model mirroring the design tool's REST API JSON.
//!
//! These structs deserialize the node subtree handed over by the
//! external fetch layer. Only the fields the lowering pipeline consumes
//! are modeled; anything else in the API payload is ignored. Unknown
//! enum values fall back to an `Unknown` variant so a newer export
//! never fails to parse.

use serde::{Deserialize, Serialize};

use crate::ir::geom::{Canvas, Rect};

/// A node in the raw design document tree.
///
/// The tree is owned by the caller and treated as immutable input; the
/// normalizer copies what it keeps.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Absent means visible; `Some(false)` nodes are pruned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_bounding_box: Option<Rect<Canvas>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    /// Per-corner radii in [top-left, top-right, bottom-right, bottom-left] order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rectangle_corner_radii: Option<[f64; 4]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    /// Text content for TEXT nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TypeStyle>,

    // Auto-layout metadata
    pub layout_mode: LayoutMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_axis_align_items: Option<AxisAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_axis_align_items: Option<AxisAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_axis_sizing_mode: Option<SizingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_axis_sizing_mode: Option<SizingMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_grow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_align: Option<LayoutAlign>,
    pub layout_positioning: LayoutPositioning,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_direction: Option<OverflowDirection>,

    /// For INSTANCE nodes: the id of the backing component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawNode>,
}

/// The design-tool node kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Document,
    Canvas,
    #[default]
    Frame,
    Group,
    Section,
    Vector,
    BooleanOperation,
    Star,
    Line,
    Ellipse,
    RegularPolygon,
    Rectangle,
    Text,
    Slice,
    Component,
    ComponentSet,
    Instance,
    #[serde(other)]
    Unknown,
}

impl NodeType {
    /// Vector-ish kinds that form icon clusters.
    pub fn is_vector(self) -> bool {
        matches!(
            self,
            NodeType::Vector
                | NodeType::BooleanOperation
                | NodeType::Star
                | NodeType::Line
                | NodeType::Ellipse
                | NodeType::RegularPolygon
        )
    }

    /// Kinds that participate in the component system.
    pub fn is_component_like(self) -> bool {
        matches!(
            self,
            NodeType::Component | NodeType::ComponentSet | NodeType::Instance
        )
    }
}

/// Explicit auto-layout direction, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
    #[serde(other)]
    Unknown,
}

/// Axis alignment values from auto-layout metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    Min,
    Center,
    Max,
    SpaceBetween,
    SpaceAround,
    Baseline,
    #[serde(other)]
    Unknown,
}

/// Per-axis sizing mode from auto-layout metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizingMode {
    Fixed,
    Auto,
    #[serde(other)]
    Unknown,
}

/// Child alignment override on the parent's cross axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutAlign {
    Inherit,
    Stretch,
    Min,
    Center,
    Max,
    #[serde(other)]
    Unknown,
}

/// Whether the node opts out of its auto-layout parent's flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutPositioning {
    #[default]
    Auto,
    Absolute,
    #[serde(other)]
    Unknown,
}

/// Scroll overflow declared on a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverflowDirection {
    None,
    HorizontalScrolling,
    VerticalScrolling,
    HorizontalAndVerticalScrolling,
    #[serde(other)]
    Unknown,
}

/// Resize constraints for absolutely positioned children.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Constraints {
    pub horizontal: HorizontalConstraint,
    pub vertical: VerticalConstraint,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalConstraint {
    #[default]
    Left,
    Right,
    Center,
    LeftRight,
    Scale,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalConstraint {
    #[default]
    Top,
    Bottom,
    Center,
    TopBottom,
    Scale,
    #[serde(other)]
    Unknown,
}

/// A fill or stroke paint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paint {
    #[serde(rename = "type")]
    pub paint_type: PaintType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorRgba>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gradient_stops: Vec<GradientStop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl Paint {
    /// Whether this paint contributes to rendering at all.
    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }

    /// Effective alpha: paint opacity times the color's own alpha.
    pub fn effective_alpha(&self) -> f64 {
        let color_alpha = self.color.map(|c| c.a).unwrap_or(1.0);
        self.opacity.unwrap_or(1.0) * color_alpha
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintType {
    #[default]
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    #[serde(other)]
    Unknown,
}

/// A color with components in 0.0..=1.0, as the API delivers them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ColorRgba {
    /// Renders as `#rrggbb`, or `rgba(r, g, b, a)` when translucent.
    pub fn to_css(&self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("rgba({}, {}, {}, {})", r, g, b, round2(self.a))
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: ColorRgba,
}

/// A visual effect attached to a node.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Effect {
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorRgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Offset>,
    pub radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
}

impl Effect {
    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectType {
    #[default]
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// Typography settings on a TEXT node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
}
