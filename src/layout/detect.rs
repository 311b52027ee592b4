//! Layout-type detection heuristics.
//!
//! Explicit auto-layout metadata always wins. Without it, child
//! positions are examined: heavily overlapping children make a stack,
//! axis-aligned non-overlapping runs make a row or column, and anything
//! else stays absolute.
//!
//! The pixel tolerances below are hand-tuned against real exports, not
//! derived. Treat them as calibration targets for a conformance suite
//! rather than guaranteed-correct thresholds.

use crate::ir::geom::{Canvas, Rect};
use crate::normalize::{NodeProps, NormalizedNode};
use crate::raw::LayoutMode;

use super::LayoutType;

/// Children are considered axis-aligned when their leading edges sit
/// within this many pixels of each other.
pub const ALIGNMENT_TOLERANCE_PX: f64 = 2.0;

/// Extra slack added to the alignment tolerance when measuring the
/// cross-axis span of a candidate row/column.
pub const SPAN_SLACK_PX: f64 = 20.0;

/// Leading/trailing offsets within this distance of each other read as
/// centered content.
pub const CENTERING_TOLERANCE_PX: f64 = 10.0;

/// Minimum leading offset for content to read as end-aligned.
pub const END_LEADING_MIN_PX: f64 = 20.0;

/// A child pair overlapping by more than this fraction of the smaller
/// child's area makes the container a stack.
pub const STACK_OVERLAP_MIN: f64 = 0.5;

/// Resolves the layout type for one node.
///
/// Priority: explicit auto-layout metadata, then positional heuristics,
/// then `Absolute`.
pub fn detect_layout_type(props: &NodeProps, children: &[NormalizedNode]) -> LayoutType {
    match props.layout_mode {
        LayoutMode::Horizontal => return LayoutType::Row,
        LayoutMode::Vertical => return LayoutType::Column,
        LayoutMode::None | LayoutMode::Unknown => {}
    }

    if children.is_empty() {
        return LayoutType::Absolute;
    }
    if children.len() == 1 {
        return LayoutType::Column;
    }

    let rects = child_rects(children);
    if rects.len() < 2 {
        return LayoutType::Absolute;
    }

    // Stack takes priority: overlap disqualifies row/column outright.
    if is_stack_by_position(&rects) {
        return LayoutType::Stack;
    }
    if is_row_by_position(&rects) {
        return LayoutType::Row;
    }
    if is_column_by_position(&rects) {
        return LayoutType::Column;
    }

    LayoutType::Absolute
}

fn child_rects(children: &[NormalizedNode]) -> Vec<Rect<Canvas>> {
    children.iter().filter_map(|c| c.props.bounds).collect()
}

/// Any pair of children overlapping by more than half the smaller
/// child's area.
fn is_stack_by_position(rects: &[Rect<Canvas>]) -> bool {
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            if a.overlap_of_smaller(b) > STACK_OVERLAP_MIN {
                return true;
            }
        }
    }
    false
}

/// Tops roughly level, and each child starting at or after the previous
/// child's right edge (minus the alignment tolerance).
fn is_row_by_position(rects: &[Rect<Canvas>]) -> bool {
    let min_y = rects.iter().map(|r| r.y).fold(f64::INFINITY, f64::min);
    let max_y = rects.iter().map(|r| r.y).fold(f64::NEG_INFINITY, f64::max);
    if max_y - min_y > ALIGNMENT_TOLERANCE_PX + SPAN_SLACK_PX {
        return false;
    }

    let mut sorted: Vec<&Rect<Canvas>> = rects.iter().collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
    sorted
        .windows(2)
        .all(|w| w[1].x >= w[0].right() - ALIGNMENT_TOLERANCE_PX)
}

/// The symmetric check on the X span and Y ordering.
fn is_column_by_position(rects: &[Rect<Canvas>]) -> bool {
    let min_x = rects.iter().map(|r| r.x).fold(f64::INFINITY, f64::min);
    let max_x = rects.iter().map(|r| r.x).fold(f64::NEG_INFINITY, f64::max);
    if max_x - min_x > ALIGNMENT_TOLERANCE_PX + SPAN_SLACK_PX {
        return false;
    }

    let mut sorted: Vec<&Rect<Canvas>> = rects.iter().collect();
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));
    sorted
        .windows(2)
        .all(|w| w[1].y >= w[0].bottom() - ALIGNMENT_TOLERANCE_PX)
}
