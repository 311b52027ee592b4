//! Raw design-document input model.
//!
//! The raw tree is what the external API client hands the pipeline:
//! a node hierarchy with absolute bounding boxes, paints, text and
//! auto-layout metadata, exactly as serialized by the design tool.

pub mod io_json;
mod model;

pub use model::{
    AxisAlign, ColorRgba, Constraints, Effect, EffectType, GradientStop, HorizontalConstraint,
    LayoutAlign, LayoutMode, LayoutPositioning, NodeType, Offset, OverflowDirection, Paint,
    PaintType, RawNode, SizingMode, TypeStyle, VerticalConstraint,
};
