//! Gap, padding, alignment and sizing resolution.
//!
//! Explicit auto-layout metadata is mapped through fixed tables; when
//! it is absent, values are measured from child positions. Missing
//! fields contribute nothing rather than erroring.

use crate::ir::geom::{Canvas, Rect};
use crate::normalize::{NodeProps, NormalizedNode};
use crate::raw::{AxisAlign, LayoutAlign, LayoutMode, SizingMode};

use super::detect::{CENTERING_TOLERANCE_PX, END_LEADING_MIN_PX};
use super::{all_children_stretch, AxisSizing, CrossAlign, LayoutType, MainAlign, Padding, ParentLayout, Sizing};

/// Resolves the gap between children along the main axis.
///
/// Explicit item spacing wins; otherwise the rounded mean of the
/// consecutive positive gaps between sorted children. Zero for fewer
/// than two children or when no positive gap exists.
pub fn resolve_gap(props: &NodeProps, children: &[NormalizedNode], layout_type: LayoutType) -> f64 {
    if props.layout_mode != LayoutMode::None {
        if let Some(spacing) = props.item_spacing {
            return spacing;
        }
    }

    let rects = bounds_of(children);
    if rects.len() < 2 {
        return 0.0;
    }

    let deltas: Vec<f64> = match layout_type {
        LayoutType::Row => sorted_deltas(&rects, |r| r.x, |r| r.right()),
        LayoutType::Column => sorted_deltas(&rects, |r| r.y, |r| r.bottom()),
        LayoutType::Stack | LayoutType::Absolute => return 0.0,
    };

    let positive: Vec<f64> = deltas.into_iter().filter(|d| *d > 0.0).collect();
    if positive.is_empty() {
        return 0.0;
    }
    (positive.iter().sum::<f64>() / positive.len() as f64).round()
}

fn sorted_deltas(
    rects: &[Rect<Canvas>],
    start: impl Fn(&Rect<Canvas>) -> f64,
    end: impl Fn(&Rect<Canvas>) -> f64,
) -> Vec<f64> {
    let mut sorted: Vec<&Rect<Canvas>> = rects.iter().collect();
    sorted.sort_by(|a, b| start(a).total_cmp(&start(b)));
    sorted.windows(2).map(|w| start(w[1]) - end(w[0])).collect()
}

/// Resolves container padding.
///
/// Explicit auto-layout padding wins; otherwise padding is measured as
/// the gap between the container's box and the union of its children,
/// clamped to zero per edge.
pub fn resolve_padding(props: &NodeProps, children: &[NormalizedNode]) -> Padding {
    if props.layout_mode != LayoutMode::None {
        return Padding {
            top: props.padding_top.unwrap_or(0.0),
            right: props.padding_right.unwrap_or(0.0),
            bottom: props.padding_bottom.unwrap_or(0.0),
            left: props.padding_left.unwrap_or(0.0),
        };
    }

    let Some(container) = props.bounds else {
        return Padding::default();
    };
    let rects = bounds_of(children);
    let Some(extent) = union_of(&rects) else {
        return Padding::default();
    };

    Padding {
        top: (extent.y - container.y).round().max(0.0),
        left: (extent.x - container.x).round().max(0.0),
        right: (container.right() - extent.right()).round().max(0.0),
        bottom: (container.bottom() - extent.bottom()).round().max(0.0),
    }
}

/// Resolves main-axis alignment: explicit metadata through the fixed
/// table, else inferred from the sorted children's edge offsets.
pub fn resolve_main_align(
    props: &NodeProps,
    children: &[NormalizedNode],
    layout_type: LayoutType,
) -> MainAlign {
    if props.layout_mode != LayoutMode::None {
        if let Some(align) = props.primary_axis_align_items {
            return map_main_align(align);
        }
    }

    let Some(container) = props.bounds else {
        return MainAlign::Start;
    };
    let rects = bounds_of(children);
    let Some(extent) = union_of(&rects) else {
        return MainAlign::Start;
    };

    let (leading, trailing) = match layout_type {
        LayoutType::Row => (extent.x - container.x, container.right() - extent.right()),
        LayoutType::Column => (extent.y - container.y, container.bottom() - extent.bottom()),
        LayoutType::Stack | LayoutType::Absolute => return MainAlign::Start,
    };

    match infer_edge_alignment(leading, trailing) {
        EdgeAlignment::Center => MainAlign::Center,
        EdgeAlignment::End => MainAlign::End,
        EdgeAlignment::Start => MainAlign::Start,
    }
}

/// Resolves cross-axis alignment. Baseline and stretch only exist on
/// this axis.
pub fn resolve_cross_align(
    props: &NodeProps,
    children: &[NormalizedNode],
    layout_type: LayoutType,
) -> CrossAlign {
    if props.layout_mode != LayoutMode::None {
        if all_children_stretch(children) {
            return CrossAlign::Stretch;
        }
        if let Some(align) = props.counter_axis_align_items {
            return map_cross_align(align);
        }
    }

    let Some(container) = props.bounds else {
        return CrossAlign::Start;
    };
    let rects = bounds_of(children);
    let Some(extent) = union_of(&rects) else {
        return CrossAlign::Start;
    };

    let (leading, trailing) = match layout_type {
        LayoutType::Row => (extent.y - container.y, container.bottom() - extent.bottom()),
        LayoutType::Column => (extent.x - container.x, container.right() - extent.right()),
        LayoutType::Stack | LayoutType::Absolute => return CrossAlign::Start,
    };

    match infer_edge_alignment(leading, trailing) {
        EdgeAlignment::Center => CrossAlign::Center,
        EdgeAlignment::End => CrossAlign::End,
        EdgeAlignment::Start => CrossAlign::Start,
    }
}

enum EdgeAlignment {
    Start,
    End,
    Center,
}

/// Leading/trailing offsets within 10px of each other read as centered;
/// a tight trailing edge with a loose leading edge reads as end-aligned.
fn infer_edge_alignment(leading: f64, trailing: f64) -> EdgeAlignment {
    if (leading - trailing).abs() <= CENTERING_TOLERANCE_PX {
        return EdgeAlignment::Center;
    }
    if trailing < CENTERING_TOLERANCE_PX && leading > END_LEADING_MIN_PX {
        return EdgeAlignment::End;
    }
    EdgeAlignment::Start
}

fn map_main_align(align: AxisAlign) -> MainAlign {
    match align {
        AxisAlign::Min => MainAlign::Start,
        AxisAlign::Max => MainAlign::End,
        AxisAlign::Center => MainAlign::Center,
        AxisAlign::SpaceBetween => MainAlign::SpaceBetween,
        AxisAlign::SpaceAround => MainAlign::SpaceAround,
        // Baseline has no meaning on the main axis.
        AxisAlign::Baseline | AxisAlign::Unknown => MainAlign::Start,
    }
}

fn map_cross_align(align: AxisAlign) -> CrossAlign {
    match align {
        AxisAlign::Min => CrossAlign::Start,
        AxisAlign::Max => CrossAlign::End,
        AxisAlign::Center => CrossAlign::Center,
        AxisAlign::Baseline => CrossAlign::Baseline,
        AxisAlign::SpaceBetween | AxisAlign::SpaceAround | AxisAlign::Unknown => CrossAlign::Start,
    }
}

/// Resolves fixed/fill/hug sizing per axis.
///
/// Fill is decided against the *parent's* axes (grow on its main axis,
/// stretch on its cross axis); hug is decided against the node's *own*
/// layout mode.
pub fn resolve_sizing(props: &NodeProps, parent: &ParentLayout) -> AxisSizing {
    AxisSizing {
        horizontal: resolve_axis_sizing(props, parent, Axis::Horizontal),
        vertical: resolve_axis_sizing(props, parent, Axis::Vertical),
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Axis {
    Horizontal,
    Vertical,
}

fn resolve_axis_sizing(props: &NodeProps, parent: &ParentLayout, axis: Axis) -> Sizing {
    let parent_main_axis = match parent.layout_type {
        Some(LayoutType::Row) => Some(Axis::Horizontal),
        Some(LayoutType::Column) => Some(Axis::Vertical),
        _ => None,
    };

    if let Some(main) = parent_main_axis {
        if main == axis && props.layout_grow == Some(1.0) {
            return Sizing::Fill;
        }
        if main != axis && props.layout_align == Some(LayoutAlign::Stretch) {
            return Sizing::Fill;
        }
    }

    let own_main_axis = match props.layout_mode {
        LayoutMode::Horizontal => Some(Axis::Horizontal),
        LayoutMode::Vertical => Some(Axis::Vertical),
        LayoutMode::None | LayoutMode::Unknown => None,
    };

    if let Some(main) = own_main_axis {
        let mode = if main == axis {
            props.primary_axis_sizing_mode
        } else {
            props.counter_axis_sizing_mode
        };
        if mode == Some(SizingMode::Auto) {
            return Sizing::Hug;
        }
    }

    Sizing::Fixed
}

fn bounds_of(children: &[NormalizedNode]) -> Vec<Rect<Canvas>> {
    children.iter().filter_map(|c| c.props.bounds).collect()
}

fn union_of(rects: &[Rect<Canvas>]) -> Option<Rect<Canvas>> {
    let mut iter = rects.iter();
    let first = *iter.next()?;
    Some(iter.fold(first, |acc, r| acc.union(r)))
}
