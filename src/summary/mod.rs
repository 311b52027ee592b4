//! Lowering summary report.
//!
//! A structured, displayable digest of one pipeline run: how many nodes
//! landed in each IR variant, how many styles and tokens were
//! registered, and what the detectors found. Purely derived from the
//! output; printing it is the CLI's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ir::IrNode;
use crate::pipeline::LowerOutput;

/// Node counts per IR variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCounts {
    pub containers: usize,
    pub texts: usize,
    pub images: usize,
    pub icons: usize,
    pub buttons: usize,
    pub cards: usize,
    pub repeaters: usize,
    pub components: usize,
}

impl VariantCounts {
    pub fn total(&self) -> usize {
        self.containers
            + self.texts
            + self.images
            + self.icons
            + self.buttons
            + self.cards
            + self.repeaters
            + self.components
    }
}

/// The full summary of one lowering run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SummaryReport {
    pub nodes: VariantCounts,
    pub styles: usize,
    pub color_tokens: usize,
    pub spacing_tokens: usize,
    pub radius_tokens: usize,
    pub typography_tokens: usize,
    pub shadow_tokens: usize,
    pub lists: usize,
    pub repeated_components: usize,
    pub variant_sets: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,
}

/// Builds the summary for a lowering output.
pub fn summarize(output: &LowerOutput) -> SummaryReport {
    let mut nodes = VariantCounts::default();
    output.root.walk(&mut |node| match node {
        IrNode::Container { .. } => nodes.containers += 1,
        IrNode::Text { .. } => nodes.texts += 1,
        IrNode::Image { .. } => nodes.images += 1,
        IrNode::Icon { .. } => nodes.icons += 1,
        IrNode::Button { .. } => nodes.buttons += 1,
        IrNode::Card { .. } => nodes.cards += 1,
        IrNode::Repeater { .. } => nodes.repeaters += 1,
        IrNode::Component { .. } => nodes.components += 1,
    });

    let tokens = &output.styles.tokens;
    SummaryReport {
        nodes,
        styles: output.styles.styles.len(),
        color_tokens: tokens.colors.len(),
        spacing_tokens: tokens.spacing.len(),
        radius_tokens: tokens.radii.len(),
        typography_tokens: tokens.typography.len(),
        shadow_tokens: tokens.shadows.len(),
        lists: output.detection.lists.len(),
        repeated_components: output.detection.components.len(),
        variant_sets: output.detection.variant_sets.len(),
        overlay: output
            .detection
            .overlay
            .as_ref()
            .map(|hint| hint.modal_type.to_string()),
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lowered {} node(s)", self.nodes.total())?;
        writeln!(f)?;

        writeln!(f, "Nodes by variant:")?;
        let rows = [
            ("container", self.nodes.containers),
            ("text", self.nodes.texts),
            ("image", self.nodes.images),
            ("icon", self.nodes.icons),
            ("button", self.nodes.buttons),
            ("card", self.nodes.cards),
            ("repeater", self.nodes.repeaters),
            ("component", self.nodes.components),
        ];
        for (label, count) in rows {
            if count > 0 {
                writeln!(f, "  {:<10} {}", label, count)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Styles: {} registered", self.styles)?;
        writeln!(
            f,
            "Tokens: {} color(s), {} spacing, {} radius, {} typography, {} shadow(s)",
            self.color_tokens,
            self.spacing_tokens,
            self.radius_tokens,
            self.typography_tokens,
            self.shadow_tokens
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "Detection: {} list(s), {} repeated component(s), {} variant set(s)",
            self.lists, self.repeated_components, self.variant_sets
        )?;
        if let Some(overlay) = &self.overlay {
            writeln!(f, "Overlay: {}", overlay)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeOptions;
    use crate::pipeline::lower;
    use crate::raw::io_json::from_json_str;

    fn sample_output() -> LowerOutput {
        let raw = from_json_str(
            r#"{
                "id": "0:1", "name": "Screen", "type": "FRAME",
                "absoluteBoundingBox": {"x": 0, "y": 0, "width": 375, "height": 812},
                "children": [
                    {"id": "0:2", "name": "Title", "type": "TEXT", "characters": "Hello",
                     "absoluteBoundingBox": {"x": 16, "y": 24, "width": 200, "height": 32}},
                    {"id": "0:3", "name": "Hero", "type": "RECTANGLE",
                     "absoluteBoundingBox": {"x": 16, "y": 72, "width": 343, "height": 180},
                     "fills": [{"type": "IMAGE", "imageRef": "img-1"}]}
                ]
            }"#,
        )
        .unwrap();
        lower(&raw, &NormalizeOptions::default())
    }

    #[test]
    fn test_variant_counts() {
        let report = summarize(&sample_output());
        assert_eq!(report.nodes.texts, 1);
        assert_eq!(report.nodes.images, 1);
        assert_eq!(report.nodes.containers, 1);
        assert_eq!(report.nodes.total(), 3);
    }

    #[test]
    fn test_display_mentions_sections() {
        let rendered = summarize(&sample_output()).to_string();
        assert!(rendered.contains("Nodes by variant:"));
        assert!(rendered.contains("Styles:"));
        assert!(rendered.contains("Detection:"));
    }
}
