//! Tree normalization: the first lowering pass.
//!
//! Filters the raw document tree down to the nodes that matter for code
//! generation. A dropped node takes its whole subtree with it; the
//! survivors are copied into [`NormalizedNode`] form with their visual
//! and layout properties intact and their children in original order.
//!
//! Drop decisions are made per node, in priority order:
//! 1. id present in the caller-supplied exclude set (fed by an upstream
//!    safe-area/chrome detector),
//! 2. `visible == false`,
//! 3. OS-chrome name heuristic (status bar, home indicator, navigation
//!    bar),
//! 4. wildcard ignore patterns (annotations, guides, measurement marks).

use std::collections::BTreeSet;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::raw::{
    AxisAlign, Constraints, Effect, LayoutAlign, LayoutMode, LayoutPositioning, NodeType,
    OverflowDirection, Paint, RawNode, SizingMode, TypeStyle,
};

use crate::ir::geom::{Canvas, Rect};

/// Name fragments that identify OS chrome. A node is dropped when its
/// lowercased name contains both fragments of any pair.
static CHROME_NAME_PAIRS: &[(&str, &str)] = &[
    ("status", "bar"),
    ("home", "indicator"),
    ("navigation", "bar"),
];

/// Ignore patterns applied when the caller does not supply any.
/// `*` matches any run of characters; matching is case-insensitive and
/// anchored to the full name.
pub static DEFAULT_IGNORE_PATTERNS: &[&str] =
    &["annotation*", "*guide*", "measurement*", "redline*"];

/// Tunables accepted by the normalizer. The only configuration surface
/// of the whole pipeline.
#[derive(Clone, Debug)]
pub struct NormalizeOptions {
    /// Wildcard name patterns to drop (`*` = any run of characters).
    pub ignore_patterns: Vec<String>,
    /// Node ids to drop, typically produced by an external safe-area
    /// detector.
    pub exclude_ids: BTreeSet<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            exclude_ids: BTreeSet::new(),
        }
    }
}

/// Visual and layout properties carried through the pipeline.
///
/// A pruned copy of the raw node's fields, minus visibility (always
/// true after filtering) and children (owned by the tree wrapper).
#[derive(Clone, Debug)]
pub struct NodeProps {
    pub id: String,
    pub name: String,
    pub node_type: NodeType,
    pub bounds: Option<Rect<Canvas>>,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: Option<f64>,
    pub effects: Vec<Effect>,
    pub corner_radius: Option<f64>,
    pub rectangle_corner_radii: Option<[f64; 4]>,
    pub opacity: Option<f64>,
    pub characters: Option<String>,
    pub text_style: Option<TypeStyle>,
    pub layout_mode: LayoutMode,
    pub item_spacing: Option<f64>,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub primary_axis_align_items: Option<AxisAlign>,
    pub counter_axis_align_items: Option<AxisAlign>,
    pub primary_axis_sizing_mode: Option<SizingMode>,
    pub counter_axis_sizing_mode: Option<SizingMode>,
    pub layout_grow: Option<f64>,
    pub layout_align: Option<LayoutAlign>,
    pub layout_positioning: LayoutPositioning,
    pub constraints: Option<Constraints>,
    pub overflow_direction: Option<OverflowDirection>,
    pub component_id: Option<String>,
}

impl NodeProps {
    fn from_raw(raw: &RawNode) -> Self {
        Self {
            id: raw.id.clone(),
            name: raw.name.clone(),
            node_type: raw.node_type,
            bounds: raw.absolute_bounding_box,
            fills: raw.fills.clone(),
            strokes: raw.strokes.clone(),
            stroke_weight: raw.stroke_weight,
            effects: raw.effects.clone(),
            corner_radius: raw.corner_radius,
            rectangle_corner_radii: raw.rectangle_corner_radii,
            opacity: raw.opacity,
            characters: raw.characters.clone(),
            text_style: raw.style.clone(),
            layout_mode: raw.layout_mode,
            item_spacing: raw.item_spacing,
            padding_left: raw.padding_left,
            padding_right: raw.padding_right,
            padding_top: raw.padding_top,
            padding_bottom: raw.padding_bottom,
            primary_axis_align_items: raw.primary_axis_align_items,
            counter_axis_align_items: raw.counter_axis_align_items,
            primary_axis_sizing_mode: raw.primary_axis_sizing_mode,
            counter_axis_sizing_mode: raw.counter_axis_sizing_mode,
            layout_grow: raw.layout_grow,
            layout_align: raw.layout_align,
            layout_positioning: raw.layout_positioning,
            constraints: raw.constraints,
            overflow_direction: raw.overflow_direction,
            component_id: raw.component_id.clone(),
        }
    }

    /// The bounding box, or a zero rect for nodes the export left
    /// unmeasured.
    pub fn bounds_or_zero(&self) -> Rect<Canvas> {
        self.bounds.unwrap_or_default()
    }

    /// First fill that actually renders as a solid color.
    pub fn first_visible_solid_fill(&self) -> Option<&Paint> {
        self.fills
            .iter()
            .find(|p| p.is_visible() && p.paint_type == crate::raw::PaintType::Solid)
    }
}

/// A node that survived filtering.
#[derive(Clone, Debug)]
pub struct NormalizedNode {
    pub props: NodeProps,
    pub children: Vec<NormalizedNode>,
}

impl NormalizedNode {
    /// The placeholder the pipeline substitutes when the root itself is
    /// filtered away.
    pub fn empty_container(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            props: NodeProps {
                id: id.into(),
                name: name.into(),
                node_type: NodeType::Frame,
                bounds: Some(Rect::default()),
                fills: Vec::new(),
                strokes: Vec::new(),
                stroke_weight: None,
                effects: Vec::new(),
                corner_radius: None,
                rectangle_corner_radii: None,
                opacity: None,
                characters: None,
                text_style: None,
                layout_mode: LayoutMode::None,
                item_spacing: None,
                padding_left: None,
                padding_right: None,
                padding_top: None,
                padding_bottom: None,
                primary_axis_align_items: None,
                counter_axis_align_items: None,
                primary_axis_sizing_mode: None,
                counter_axis_sizing_mode: None,
                layout_grow: None,
                layout_align: None,
                layout_positioning: LayoutPositioning::Auto,
                constraints: None,
                overflow_direction: None,
                component_id: None,
            },
            children: Vec::new(),
        }
    }

    /// Depth-first iteration helper used by tests and detectors.
    pub fn walk(&self, visit: &mut impl FnMut(&NormalizedNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Filters the raw tree, returning `None` when the root itself is
/// dropped. The caller is responsible for substituting a placeholder.
pub fn filter_tree(root: &RawNode, opts: &NormalizeOptions) -> Option<NormalizedNode> {
    let patterns = compile_patterns(&opts.ignore_patterns);
    let kept = filter_node(root, opts, &patterns);
    if kept.is_none() {
        debug!("normalize: root '{}' filtered out", root.name);
    }
    kept
}

fn filter_node(
    node: &RawNode,
    opts: &NormalizeOptions,
    patterns: &[Regex],
) -> Option<NormalizedNode> {
    if should_drop(node, opts, patterns) {
        return None;
    }

    let children = node
        .children
        .iter()
        .filter_map(|child| filter_node(child, opts, patterns))
        .collect();

    Some(NormalizedNode {
        props: NodeProps::from_raw(node),
        children,
    })
}

fn should_drop(node: &RawNode, opts: &NormalizeOptions, patterns: &[Regex]) -> bool {
    if opts.exclude_ids.contains(&node.id) {
        return true;
    }
    if node.visible == Some(false) {
        return true;
    }
    if is_os_chrome(&node.name) {
        return true;
    }
    patterns.iter().any(|p| p.is_match(&node.name))
}

/// Matches status bars, home indicators and navigation bars by
/// case-insensitive substring pairs.
fn is_os_chrome(name: &str) -> bool {
    let lower = name.to_lowercase();
    CHROME_NAME_PAIRS
        .iter()
        .any(|(a, b)| lower.contains(a) && lower.contains(b))
}

/// Compiles wildcard patterns into anchored, case-insensitive regexes.
/// Invalid patterns are skipped rather than failing the whole pass.
fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| wildcard_to_regex(p))
        .collect()
}

fn wildcard_to_regex(pattern: &str) -> Option<Regex> {
    static SPLITTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").expect("static regex"));

    let mut source = String::from("(?i)^");
    let mut last = 0;
    for m in SPLITTER.find_iter(pattern) {
        source.push_str(&regex::escape(&pattern[last..m.start()]));
        source.push_str(".*");
        last = m.end();
    }
    source.push_str(&regex::escape(&pattern[last..]));
    source.push('$');

    Regex::new(&source).ok()
}
