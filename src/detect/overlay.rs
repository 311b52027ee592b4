//! Modal overlay detection.
//!
//! A screen with an open modal exports as the whole screen plus a
//! scrim: a full-bleed, semi-transparent frame wrapping the actual
//! sheet or dialog. Detecting that shape lets the pipeline generate the
//! sheet content instead of a frozen screenshot of the screen.

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::layout::LayoutNode;
use crate::raw::PaintType;

/// Effective scrim alpha must fall inside this window: below it the
/// fill is decoration, above it an ordinary opaque background.
pub const SCRIM_ALPHA_MIN: f64 = 0.1;
pub const SCRIM_ALPHA_MAX: f64 = 0.8;

/// Edge-snap tolerance for sheet alignment and scrim coverage.
const EDGE_TOLERANCE_PX: f64 = 2.0;

static SHEET_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(sheet|modal|dialog|drawer|popup)\b").expect("static regex"));

/// The kind of overlay found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalType {
    BottomSheet,
    TopSheet,
    Dialog,
}

impl fmt::Display for ModalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModalType::BottomSheet => "bottom-sheet",
            ModalType::TopSheet => "top-sheet",
            ModalType::Dialog => "dialog",
        };
        write!(f, "{}", s)
    }
}

/// A detected overlay. `content_id` is the subtree the pipeline should
/// generate instead of the whole screen.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OverlayHint {
    pub modal_type: ModalType,
    pub scrim_id: String,
    pub content_id: String,
}

/// Looks for a scrim + sheet/dialog shape among the screen's direct
/// children.
pub fn detect_modal_overlay(screen: &LayoutNode) -> Option<OverlayHint> {
    let screen_bounds = screen.props.bounds?;

    for child in &screen.children {
        let Some(child_bounds) = child.props.bounds else {
            continue;
        };
        if !child_bounds.covers(&screen_bounds, EDGE_TOLERANCE_PX) {
            continue;
        }
        if !has_scrim_fill(child) {
            continue;
        }

        if let Some((content, modal_type)) = find_sheet_content(child, screen) {
            debug!(
                "overlay: {} behind scrim '{}', content '{}'",
                modal_type, child.props.name, content.props.name
            );
            return Some(OverlayHint {
                modal_type,
                scrim_id: child.props.id.clone(),
                content_id: content.props.id.clone(),
            });
        }
    }
    None
}

/// A visible solid fill whose effective alpha (paint opacity × color
/// alpha × node opacity) sits in the scrim window.
fn has_scrim_fill(node: &LayoutNode) -> bool {
    let node_opacity = node.props.opacity.unwrap_or(1.0);
    node.props.fills.iter().any(|paint| {
        if !paint.is_visible() || paint.paint_type != PaintType::Solid {
            return false;
        }
        let alpha = paint.effective_alpha() * node_opacity;
        (SCRIM_ALPHA_MIN..=SCRIM_ALPHA_MAX).contains(&alpha)
    })
}

/// Finds the sheet/dialog frame among the scrim's descendants:
/// edge-aligned with rounding on the far corners, or matched by name.
fn find_sheet_content<'a>(
    scrim: &'a LayoutNode,
    screen: &LayoutNode,
) -> Option<(&'a LayoutNode, ModalType)> {
    let screen_bounds = screen.props.bounds?;
    scrim
        .children
        .iter()
        .find_map(|child| scan_for_sheet(child, screen_bounds))
}

fn scan_for_sheet(
    node: &LayoutNode,
    screen_bounds: crate::ir::Rect<crate::ir::Canvas>,
) -> Option<(&LayoutNode, ModalType)> {
    if let Some(bounds) = node.props.bounds {
        // Partial-height frames snapped to an edge, with the far
        // corners rounded and the near corners square.
        if bounds.height < screen_bounds.height - EDGE_TOLERANCE_PX {
            let bottom_aligned =
                (bounds.bottom() - screen_bounds.bottom()).abs() <= EDGE_TOLERANCE_PX;
            let top_aligned = (bounds.y - screen_bounds.y).abs() <= EDGE_TOLERANCE_PX;

            if bottom_aligned && has_partial_rounding(node, SheetEdge::Bottom) {
                return Some((node, ModalType::BottomSheet));
            }
            if top_aligned && has_partial_rounding(node, SheetEdge::Top) {
                return Some((node, ModalType::TopSheet));
            }
        }

        if SHEET_NAME.is_match(&node.props.name) {
            return Some((
                node,
                modal_type_from_name(&node.props.name, bounds, screen_bounds),
            ));
        }
    }

    node.children
        .iter()
        .find_map(|child| scan_for_sheet(child, screen_bounds))
}

enum SheetEdge {
    Top,
    Bottom,
}

/// Corner radii arrive as [top-left, top-right, bottom-right,
/// bottom-left]. A bottom sheet rounds its top corners only; a top
/// sheet the reverse.
fn has_partial_rounding(node: &LayoutNode, edge: SheetEdge) -> bool {
    let Some([tl, tr, br, bl]) = node.props.rectangle_corner_radii else {
        return false;
    };
    match edge {
        SheetEdge::Bottom => tl > 0.0 && tr > 0.0 && br == 0.0 && bl == 0.0,
        SheetEdge::Top => tl == 0.0 && tr == 0.0 && br > 0.0 && bl > 0.0,
    }
}

fn modal_type_from_name(
    name: &str,
    bounds: crate::ir::Rect<crate::ir::Canvas>,
    screen: crate::ir::Rect<crate::ir::Canvas>,
) -> ModalType {
    let lower = name.to_lowercase();
    if lower.contains("sheet") || lower.contains("drawer") {
        // Decide the edge from position.
        let to_bottom = (screen.bottom() - bounds.bottom()).abs();
        let to_top = (bounds.y - screen.y).abs();
        if to_top < to_bottom {
            return ModalType::TopSheet;
        }
        return ModalType::BottomSheet;
    }
    ModalType::Dialog
}
