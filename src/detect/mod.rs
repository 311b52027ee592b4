//! Pattern detectors: the final lowering pass.
//!
//! Detectors read the IR (or the layout tree, for the visual ones) and
//! report hints. They never mutate the structures they inspect, and the
//! absence of a pattern is a valid empty result — no detector errors on
//! malformed input, it just skips nodes that fail its type guards.

pub mod fingerprint;
pub mod list;
pub mod overlay;
pub mod repetition;
pub mod variants;

pub use list::{detect_lists, ListHint, Orientation, MIN_LIST_ITEMS};
pub use overlay::{detect_modal_overlay, ModalType, OverlayHint};
pub use repetition::{detect_repetition, ComponentHint};
pub use variants::{
    detect_variant_sets, InteractionState, VariantProperty, VariantSetHint, VariantState,
};

use serde::{Deserialize, Serialize};

/// Everything the detectors found in one pipeline run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    pub lists: Vec<ListHint>,
    pub components: Vec<ComponentHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayHint>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub variant_sets: Vec<VariantSetHint>,
}

impl DetectionResult {
    /// True when nothing at all was detected.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
            && self.components.is_empty()
            && self.overlay.is_none()
            && self.variant_sets.is_empty()
    }
}
