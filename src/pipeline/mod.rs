//! The lowering pipeline.
//!
//! Runs the stages in their fixed order — normalize, layout, overlay
//! detection, classify, style extraction, pattern detection — and
//! assembles the output triple. The whole pipeline is a pure function
//! of its input tree and options: no I/O, no clock, no shared state, so
//! two runs over identical input serialize identically.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::classify::recognize;
use crate::detect::{
    detect_lists, detect_modal_overlay, detect_repetition, detect_variant_sets, DetectionResult,
};
use crate::ir::{IrNode, StylesBundle};
use crate::layout::annotate_tree;
use crate::normalize::{filter_tree, NormalizeOptions, NormalizedNode};
use crate::raw::RawNode;
use crate::style::extract_styles;

/// The output triple of one pipeline run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LowerOutput {
    pub root: IrNode,
    pub styles: StylesBundle,
    pub detection: DetectionResult,
}

/// Lowers a raw document tree into IR, styles and detection hints.
///
/// A root that filters away entirely is replaced by an empty container
/// placeholder rather than failing. When a modal overlay is detected,
/// the sheet/dialog content subtree becomes the effective generation
/// root; the whole screen still feeds style and variant analysis.
pub fn lower(raw: &RawNode, opts: &NormalizeOptions) -> LowerOutput {
    let normalized = filter_tree(raw, opts).unwrap_or_else(|| {
        debug!("pipeline: root filtered away, substituting placeholder");
        let id = if raw.id.is_empty() {
            "root"
        } else {
            raw.id.as_str()
        };
        NormalizedNode::empty_container(id, "Empty")
    });

    let layout_root = annotate_tree(normalized);

    let overlay = detect_modal_overlay(&layout_root);
    let effective_root = overlay
        .as_ref()
        .and_then(|hint| layout_root.find(&hint.content_id))
        .unwrap_or(&layout_root);
    if let Some(hint) = &overlay {
        debug!(
            "pipeline: generating {} content '{}' instead of the screen",
            hint.modal_type, hint.content_id
        );
    }

    let mut root = recognize(effective_root);
    let styles = extract_styles(&mut root, &layout_root);

    let detection = DetectionResult {
        lists: detect_lists(&root),
        components: detect_repetition(&root),
        overlay,
        variant_sets: detect_variant_sets(&layout_root),
    };

    LowerOutput {
        root,
        styles,
        detection,
    }
}
