//! Style and token extraction: the fourth lowering pass.
//!
//! Lifts each node's visual properties into an [`ExtractedStyle`],
//! registers it under a content-hash-deduplicated name, rewrites the
//! node's `style_ref` to the winning name, and finally buckets every
//! distinct design value into the token tables.
//!
//! Registration runs in DFS order over the IR tree, which fixes which
//! name wins a collision and makes suffix assignment reproducible.

use std::collections::{BTreeMap, HashMap};

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{
    Border, CornerRadius, ExtractedStyle, IrNode, Shadow, StylesBundle, TokenTables, Typography,
};
use crate::layout::{AbsolutePosition, LayoutNode};
use crate::normalize::NodeProps;
use crate::raw::{EffectType, NodeType, Paint, PaintType};

/// Derives a style-ref name from a node name: lowercased, kebab-cased,
/// with a `style` fallback for names that sanitize away entirely.
pub fn sanitize_style_name(name: &str) -> String {
    static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

    let lowered = name.to_lowercase();
    let kebab = NON_ALNUM.replace_all(&lowered, "-");
    let trimmed = kebab.trim_matches('-');
    if trimmed.is_empty() {
        "style".to_string()
    } else {
        trimmed.to_string()
    }
}

/// The mutable dedup registry threaded through extraction.
///
/// Identical content (by hash, confirmed by equality) reuses the first
/// registered name; a name collision with different content takes a
/// numeric suffix.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    styles: BTreeMap<String, ExtractedStyle>,
    by_hash: HashMap<u32, String>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a style, returning the name it ended up under.
    pub fn register(&mut self, preferred: &str, style: ExtractedStyle) -> String {
        let hash = style.content_hash();
        if let Some(existing) = self.by_hash.get(&hash) {
            // Hash hit still verifies content: a checksum collision must
            // not merge distinct styles.
            if self.styles.get(existing) == Some(&style) {
                return existing.clone();
            }
        }

        let preferred = if preferred.is_empty() {
            "style"
        } else {
            preferred
        };
        let mut name = preferred.to_string();
        let mut suffix = 2;
        while self.styles.contains_key(&name) {
            name = format!("{}-{}", preferred, suffix);
            suffix += 1;
        }

        trace!("style: registered '{}'", name);
        self.by_hash.entry(hash).or_insert_with(|| name.clone());
        self.styles.insert(name.clone(), style);
        name
    }

    fn into_styles(self) -> BTreeMap<String, ExtractedStyle> {
        self.styles
    }
}

/// Extracts styles for the whole IR tree, rewriting each node's
/// `style_ref` to its deduplicated name, then collects tokens.
pub fn extract_styles(root: &mut IrNode, layout: &LayoutNode) -> StylesBundle {
    let mut index: HashMap<String, &LayoutNode> = HashMap::new();
    index_layout(layout, &mut index);

    let mut registry = StyleRegistry::new();
    extract_node(root, &index, &mut registry);

    let mut tokens = TokenTables::default();
    for style in registry.styles.values() {
        collect_style_tokens(style, &mut tokens);
    }
    collect_layout_tokens(layout, &mut tokens);

    StylesBundle {
        styles: registry.into_styles(),
        tokens,
    }
}

fn index_layout<'a>(node: &'a LayoutNode, index: &mut HashMap<String, &'a LayoutNode>) {
    index.insert(node.props.id.clone(), node);
    for child in &node.children {
        index_layout(child, index);
    }
}

fn extract_node(
    node: &mut IrNode,
    index: &HashMap<String, &LayoutNode>,
    registry: &mut StyleRegistry,
) {
    let preferred = node.base().style_ref.clone();
    let style = match index.get(&node.base().id) {
        Some(layout_node) => build_style(&layout_node.props, node.base().layout.position.as_ref()),
        // Nodes synthesized by the pipeline carry no visual input.
        None => ExtractedStyle::default(),
    };

    let name = registry.register(&preferred, style);
    node.base_mut().style_ref = name;

    if let IrNode::Button {
        base,
        label_style_ref,
        icon_style_ref,
        ..
    } = node
    {
        let (label, icon) = button_secondary_styles(base, index, registry);
        *label_style_ref = label;
        *icon_style_ref = icon;
    }

    for child in node.children_mut() {
        extract_node(child, index, registry);
    }
}

/// Buttons absorb their label/icon children during classification, so
/// the secondary styles are pulled from the layout tree and registered
/// through the same dedup path.
fn button_secondary_styles(
    base: &crate::ir::NodeBase,
    index: &HashMap<String, &LayoutNode>,
    registry: &mut StyleRegistry,
) -> (Option<String>, Option<String>) {
    let Some(layout_node) = index.get(&base.id) else {
        return (None, None);
    };

    let stem = sanitize_style_name(&base.name);
    let mut label_ref = None;
    let mut icon_ref = None;

    for child in &layout_node.children {
        if child.props.node_type == NodeType::Text && label_ref.is_none() {
            let style = build_style(&child.props, None);
            label_ref = Some(registry.register(&format!("{}-label", stem), style));
        } else if child.props.node_type.is_vector() && icon_ref.is_none() {
            let style = build_style(&child.props, None);
            icon_ref = Some(registry.register(&format!("{}-icon", stem), style));
        }
    }

    (label_ref, icon_ref)
}

/// Builds the style object for one node. Every absent input field
/// simply contributes nothing.
fn build_style(props: &NodeProps, position: Option<&AbsolutePosition>) -> ExtractedStyle {
    let mut style = ExtractedStyle::default();

    if let Some(css) = props.fills.iter().find_map(paint_to_css) {
        if props.node_type == NodeType::Text {
            style.color = Some(css);
        } else {
            style.background = Some(css);
        }
    }

    if let Some(stroke_css) = props.strokes.iter().find_map(paint_to_css) {
        style.border = Some(Border {
            width: props.stroke_weight.unwrap_or(1.0),
            color: stroke_css,
        });
    }

    for effect in props.effects.iter().filter(|e| e.is_visible()) {
        match effect.effect_type {
            EffectType::DropShadow | EffectType::InnerShadow => {
                if style.shadow.is_none() {
                    let offset = effect.offset.unwrap_or_default();
                    style.shadow = Some(Shadow {
                        offset_x: offset.x,
                        offset_y: offset.y,
                        blur: effect.radius,
                        spread: effect.spread,
                        color: effect
                            .color
                            .map(|c| c.to_css())
                            .unwrap_or_else(|| "rgba(0, 0, 0, 0.25)".to_string()),
                        inset: effect.effect_type == EffectType::InnerShadow,
                    });
                }
            }
            EffectType::LayerBlur | EffectType::BackgroundBlur => {
                if style.blur.is_none() {
                    style.blur = Some(effect.radius);
                }
            }
            EffectType::Unknown => {}
        }
    }

    style.corner_radius = corner_radius_of(props);

    if let Some(opacity) = props.opacity {
        if opacity < 1.0 {
            style.opacity = Some(opacity);
        }
    }

    if let Some(text_style) = &props.text_style {
        let typography = Typography {
            family: text_style.font_family.clone(),
            weight: text_style.font_weight,
            size: text_style.font_size,
            line_height: text_style.line_height_px,
            letter_spacing: text_style.letter_spacing,
            text_align: text_style.text_align_horizontal.clone(),
        };
        if !typography.is_empty() {
            style.typography = Some(typography);
        }
    }

    style.position = position.copied();

    style
}

/// Renders a paint to CSS. Image paints contribute no style (the Image
/// variant owns the asset reference).
fn paint_to_css(paint: &Paint) -> Option<String> {
    if !paint.is_visible() {
        return None;
    }
    match paint.paint_type {
        PaintType::Solid => {
            let mut color = paint.color?;
            let paint_opacity = paint.opacity.unwrap_or(1.0);
            if paint_opacity < 1.0 {
                color.a *= paint_opacity;
            }
            Some(color.to_css())
        }
        PaintType::GradientLinear
        | PaintType::GradientRadial
        | PaintType::GradientAngular
        | PaintType::GradientDiamond => {
            if paint.gradient_stops.is_empty() {
                return None;
            }
            let stops: Vec<String> = paint
                .gradient_stops
                .iter()
                .map(|stop| {
                    format!(
                        "{} {}%",
                        stop.color.to_css(),
                        ((stop.position * 100.0) * 100.0).round() / 100.0
                    )
                })
                .collect();
            Some(format!("linear-gradient({})", stops.join(", ")))
        }
        PaintType::Image | PaintType::Unknown => None,
    }
}

fn corner_radius_of(props: &NodeProps) -> Option<CornerRadius> {
    if let Some(radii) = props.rectangle_corner_radii {
        if radii.iter().any(|r| *r > 0.0) {
            if radii.iter().all(|r| *r == radii[0]) {
                return Some(CornerRadius::Uniform(radii[0]));
            }
            return Some(CornerRadius::PerCorner(radii));
        }
        return None;
    }
    props
        .corner_radius
        .filter(|r| *r > 0.0)
        .map(CornerRadius::Uniform)
}

fn collect_style_tokens(style: &ExtractedStyle, tokens: &mut TokenTables) {
    if let Some(background) = &style.background {
        if is_color_value(background) {
            tokens.push_color(background.clone());
        }
    }
    if let Some(color) = &style.color {
        if is_color_value(color) {
            tokens.push_color(color.clone());
        }
    }
    if let Some(border) = &style.border {
        if is_color_value(&border.color) {
            tokens.push_color(border.color.clone());
        }
    }
    if let Some(shadow) = &style.shadow {
        tokens.push_color(shadow.color.clone());
        tokens.push_shadow(shadow.clone());
    }
    match &style.corner_radius {
        Some(CornerRadius::Uniform(radius)) => tokens.push_radius(*radius),
        Some(CornerRadius::PerCorner(radii)) => {
            for radius in radii {
                tokens.push_radius(*radius);
            }
        }
        None => {}
    }
    if let Some(typography) = &style.typography {
        tokens.push_typography(typography.clone());
    }
}

fn is_color_value(value: &str) -> bool {
    value.starts_with('#') || value.starts_with("rgba(")
}

/// Gap and padding values are walked separately from the style scan.
fn collect_layout_tokens(node: &LayoutNode, tokens: &mut TokenTables) {
    tokens.push_spacing(node.layout.gap);
    let padding = node.layout.padding;
    for value in [padding.top, padding.right, padding.bottom, padding.left] {
        tokens.push_spacing(value);
    }
    for child in &node.children {
        collect_layout_tokens(child, tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::geom::Rect;
    use crate::raw::ColorRgba;

    fn solid(r: f64, g: f64, b: f64) -> Paint {
        Paint {
            paint_type: PaintType::Solid,
            color: Some(ColorRgba { r, g, b, a: 1.0 }),
            ..Default::default()
        }
    }

    fn filled_style(color: &str) -> ExtractedStyle {
        ExtractedStyle {
            background: Some(color.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_sanitize_style_name() {
        assert_eq!(sanitize_style_name("Primary Button"), "primary-button");
        assert_eq!(sanitize_style_name("icon/settings 24px"), "icon-settings-24px");
        assert_eq!(sanitize_style_name("=!@="), "style");
    }

    #[test]
    fn test_registry_reuses_identical_content() {
        let mut registry = StyleRegistry::new();
        let first = registry.register("card", filled_style("#ffffff"));
        let second = registry.register("panel", filled_style("#ffffff"));
        assert_eq!(first, "card");
        assert_eq!(second, "card"); // identical content resolves to one name
    }

    #[test]
    fn test_registry_suffixes_name_collisions() {
        let mut registry = StyleRegistry::new();
        let first = registry.register("card", filled_style("#ffffff"));
        let second = registry.register("card", filled_style("#000000"));
        let third = registry.register("card", filled_style("#ff0000"));
        assert_eq!(first, "card");
        assert_eq!(second, "card-2");
        assert_eq!(third, "card-3");
    }

    #[test]
    fn test_build_style_background_vs_text_color() {
        let mut frame = crate::normalize::NormalizedNode::empty_container("1", "Panel");
        frame.props.fills = vec![solid(1.0, 1.0, 1.0)];
        let style = build_style(&frame.props, None);
        assert_eq!(style.background.as_deref(), Some("#ffffff"));
        assert!(style.color.is_none());

        let mut text = crate::normalize::NormalizedNode::empty_container("2", "Label");
        text.props.node_type = NodeType::Text;
        text.props.fills = vec![solid(0.0, 0.0, 0.0)];
        let style = build_style(&text.props, None);
        assert_eq!(style.color.as_deref(), Some("#000000"));
        assert!(style.background.is_none());
    }

    #[test]
    fn test_paint_opacity_folds_into_color() {
        let paint = Paint {
            paint_type: PaintType::Solid,
            opacity: Some(0.5),
            color: Some(ColorRgba {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.9,
            }),
            ..Default::default()
        };
        assert_eq!(paint_to_css(&paint).as_deref(), Some("rgba(0, 0, 0, 0.45)"));
    }

    #[test]
    fn test_uniform_vs_per_corner_radii() {
        let mut node = crate::normalize::NormalizedNode::empty_container("1", "Sheet");
        node.props.rectangle_corner_radii = Some([16.0, 16.0, 16.0, 16.0]);
        assert_eq!(
            corner_radius_of(&node.props),
            Some(CornerRadius::Uniform(16.0))
        );

        node.props.rectangle_corner_radii = Some([16.0, 16.0, 0.0, 0.0]);
        assert_eq!(
            corner_radius_of(&node.props),
            Some(CornerRadius::PerCorner([16.0, 16.0, 0.0, 0.0]))
        );
    }

    #[test]
    fn test_invisible_effects_ignored() {
        let mut node = crate::normalize::NormalizedNode::empty_container("1", "Card");
        node.props.bounds = Some(Rect::new(0.0, 0.0, 10.0, 10.0));
        node.props.effects = vec![crate::raw::Effect {
            effect_type: EffectType::DropShadow,
            visible: Some(false),
            radius: 4.0,
            ..Default::default()
        }];
        let style = build_style(&node.props, None);
        assert!(style.shadow.is_none());
    }
}
