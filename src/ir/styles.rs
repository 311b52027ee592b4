//! Extracted style objects and the deduplicated styles bundle.
//!
//! Visual properties are lifted off the raw nodes into flat,
//! CSS-shaped [`ExtractedStyle`] values. The bundle guarantees that no
//! two names carry byte-identical content; the token tables collect the
//! distinct design values seen anywhere in the tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::layout::AbsolutePosition;

/// A border derived from a stroke paint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub width: f64,
    pub color: String,
}

/// A shadow derived from a drop/inner shadow effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
    pub color: String,
    pub inset: bool,
}

/// Corner rounding: one radius, or per-corner values in
/// [top-left, top-right, bottom-right, bottom-left] order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CornerRadius {
    Uniform(f64),
    PerCorner([f64; 4]),
}

/// A typography signature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

impl Typography {
    pub fn is_empty(&self) -> bool {
        *self == Typography::default()
    }
}

/// The style lifted off one node. Absent fields mean "no contribution".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Foreground color for text runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<CornerRadius>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<Typography>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<AbsolutePosition>,
}

impl ExtractedStyle {
    /// True when nothing was lifted off the node.
    pub fn is_empty(&self) -> bool {
        *self == ExtractedStyle::default()
    }

    /// A stable content hash over the style's sorted key/value pairs.
    ///
    /// Serialization goes through `serde_json::Value`, whose object
    /// maps are ordered, so two styles with equal content always hash
    /// the same regardless of how they were built.
    pub fn content_hash(&self) -> u32 {
        let value = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        crc32c::crc32c(value.to_string().as_bytes())
    }
}

/// One deduplicated token table per design-value family.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenTables {
    pub colors: Vec<String>,
    pub spacing: Vec<f64>,
    pub radii: Vec<f64>,
    pub typography: Vec<Typography>,
    pub shadows: Vec<Shadow>,
}

impl TokenTables {
    /// Pushes a value unless an exactly equal one is already present.
    pub fn push_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        if !self.colors.contains(&color) {
            self.colors.push(color);
        }
    }

    pub fn push_spacing(&mut self, value: f64) {
        if value > 0.0 && !self.spacing.contains(&value) {
            self.spacing.push(value);
        }
    }

    pub fn push_radius(&mut self, value: f64) {
        if value > 0.0 && !self.radii.contains(&value) {
            self.radii.push(value);
        }
    }

    pub fn push_typography(&mut self, typography: Typography) {
        if !typography.is_empty() && !self.typography.contains(&typography) {
            self.typography.push(typography);
        }
    }

    pub fn push_shadow(&mut self, shadow: Shadow) {
        if !self.shadows.contains(&shadow) {
            self.shadows.push(shadow);
        }
    }
}

/// All styles and tokens produced by one pipeline run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StylesBundle {
    pub styles: BTreeMap<String, ExtractedStyle>,
    pub tokens: TokenTables,
}

impl StylesBundle {
    /// Looks up a style by ref name.
    pub fn get(&self, style_ref: &str) -> Option<&ExtractedStyle> {
        self.styles.get(style_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_with_background(color: &str) -> ExtractedStyle {
        ExtractedStyle {
            background: Some(color.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_equal_content_hashes_equal() {
        let a = style_with_background("#ff0000");
        let b = style_with_background("#ff0000");
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_different_content_hashes_differ() {
        let a = style_with_background("#ff0000");
        let b = style_with_background("#00ff00");
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_hash_insensitive_to_construction_order() {
        // Same fields set through different paths still hash equal.
        let mut a = ExtractedStyle::default();
        a.opacity = Some(0.5);
        a.background = Some("#fff".into());

        let b = ExtractedStyle {
            background: Some("#fff".into()),
            opacity: Some(0.5),
            ..Default::default()
        };
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_token_tables_dedupe_exactly() {
        let mut tokens = TokenTables::default();
        tokens.push_color("#ff0000");
        tokens.push_color("#ff0000");
        tokens.push_spacing(8.0);
        tokens.push_spacing(8.0);
        tokens.push_spacing(16.0);
        tokens.push_spacing(0.0); // zero spacing is noise

        assert_eq!(tokens.colors.len(), 1);
        assert_eq!(tokens.spacing, vec![8.0, 16.0]);
    }

    #[test]
    fn test_empty_style_is_empty() {
        assert!(ExtractedStyle::default().is_empty());
        assert!(!style_with_background("#000").is_empty());
    }
}
