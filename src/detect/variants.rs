//! Variant and interaction-state detection for component sets.
//!
//! Component-set children are named as comma-separated `Property=Value`
//! pairs. The detector unions the values per property and classifies
//! each variant into an interaction state, first by keyword, then by
//! visual deltas against the set's default variant.

use serde::{Deserialize, Serialize};

use crate::layout::LayoutNode;
use crate::raw::NodeType;

/// Below this opacity a variant reads as disabled.
const DISABLED_OPACITY_MAX: f64 = 0.6;

/// One variant axis of a component set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariantProperty {
    pub name: String,
    /// Distinct values in first-seen order.
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// The interaction state a variant represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionState {
    Pressed,
    Disabled,
    Loading,
    Error,
    Hover,
    Focused,
    Default,
}

/// State classification for one variant child.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariantState {
    pub variant_id: String,
    pub variant_name: String,
    pub state: InteractionState,
}

/// Everything detected about one component set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariantSetHint {
    pub set_id: String,
    pub set_name: String,
    pub properties: Vec<VariantProperty>,
    pub states: Vec<VariantState>,
}

/// Finds every component set in the tree and parses its variants.
pub fn detect_variant_sets(root: &LayoutNode) -> Vec<VariantSetHint> {
    let mut hints = Vec::new();
    collect_sets(root, &mut hints);
    hints
}

fn collect_sets(node: &LayoutNode, hints: &mut Vec<VariantSetHint>) {
    if node.props.node_type == NodeType::ComponentSet && !node.children.is_empty() {
        hints.push(analyze_set(node));
    }
    for child in &node.children {
        collect_sets(child, hints);
    }
}

fn analyze_set(set: &LayoutNode) -> VariantSetHint {
    let mut properties: Vec<VariantProperty> = Vec::new();

    for variant in &set.children {
        for (name, value) in parse_variant_name(&variant.props.name) {
            match properties.iter_mut().find(|p| p.name == name) {
                Some(property) => {
                    if !property.values.contains(&value) {
                        property.values.push(value);
                    }
                }
                None => properties.push(VariantProperty {
                    name,
                    values: vec![value],
                    default_value: None,
                }),
            }
        }
    }

    // The default per property: an explicit "Default" value if one
    // exists, else the first variant's value.
    for property in &mut properties {
        property.default_value = property
            .values
            .iter()
            .find(|v| v.eq_ignore_ascii_case("default"))
            .or_else(|| property.values.first())
            .cloned();
    }

    let default_variant = set.children.first();
    let states = set
        .children
        .iter()
        .map(|variant| VariantState {
            variant_id: variant.props.id.clone(),
            variant_name: variant.props.name.clone(),
            state: classify_state(variant, default_variant),
        })
        .collect();

    VariantSetHint {
        set_id: set.props.id.clone(),
        set_name: set.props.name.clone(),
        properties,
        states,
    }
}

/// Splits `"State=Pressed, Size=Large"` into pairs. Malformed segments
/// are skipped, never an error.
fn parse_variant_name(name: &str) -> Vec<(String, String)> {
    name.split(',')
        .filter_map(|segment| {
            let (key, value) = segment.split_once('=')?;
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Keyword match on the variant's property pairs, refined by visual
/// deltas against the default variant.
fn classify_state(variant: &LayoutNode, default_variant: Option<&LayoutNode>) -> InteractionState {
    for (name, value) in parse_variant_name(&variant.props.name) {
        let haystack = format!("{} {}", name, value).to_lowercase();
        // "inactive" must not fall into the "active" bucket.
        if haystack.contains("disab") || haystack.contains("inactive") {
            return InteractionState::Disabled;
        }
        if haystack.contains("press") || haystack.contains("active") {
            return InteractionState::Pressed;
        }
        if haystack.contains("load") {
            return InteractionState::Loading;
        }
        if haystack.contains("error") || haystack.contains("invalid") {
            return InteractionState::Error;
        }
        if haystack.contains("hover") {
            return InteractionState::Hover;
        }
        if haystack.contains("focus") {
            return InteractionState::Focused;
        }
    }

    // Visual refinement: opacity, telltale descendants, fill deltas.
    if variant.props.opacity.is_some_and(|o| o < DISABLED_OPACITY_MAX) {
        return InteractionState::Disabled;
    }
    if has_descendant_named(variant, &["spinner", "loader", "loading"]) {
        return InteractionState::Loading;
    }
    if has_descendant_named(variant, &["error", "alert", "warning"]) {
        return InteractionState::Error;
    }

    if let Some(default) = default_variant {
        if !std::ptr::eq(variant, default) && fill_differs(variant, default) {
            return InteractionState::Pressed;
        }
    }

    InteractionState::Default
}

fn has_descendant_named(node: &LayoutNode, needles: &[&str]) -> bool {
    let mut found = false;
    node.walk(&mut |n| {
        if found {
            return;
        }
        let lower = n.props.name.to_lowercase();
        if needles.iter().any(|needle| lower.contains(needle)) {
            found = true;
        }
    });
    found
}

fn fill_differs(a: &LayoutNode, b: &LayoutNode) -> bool {
    let color_of = |n: &LayoutNode| {
        n.props
            .first_visible_solid_fill()
            .and_then(|p| p.color)
            .map(|c| c.to_css())
    };
    match (color_of(a), color_of(b)) {
        (Some(left), Some(right)) => left != right,
        _ => false,
    }
}
