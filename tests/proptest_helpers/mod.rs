#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

use framelift::raw::{ColorRgba, LayoutMode, NodeType, Paint, PaintType, RawNode};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

fn name_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        proptest::string::string_regex("[A-Za-z][A-Za-z0-9 ]{0,14}").expect("valid name regex"),
        Just("Status Bar".to_string()),
        Just("Item Row".to_string()),
        Just("Pay Button".to_string()),
    ]
    .boxed()
}

fn node_type_strategy() -> BoxedStrategy<NodeType> {
    prop_oneof![
        Just(NodeType::Frame),
        Just(NodeType::Group),
        Just(NodeType::Rectangle),
        Just(NodeType::Text),
        Just(NodeType::Vector),
        Just(NodeType::Instance),
    ]
    .boxed()
}

type NodeSeed = (
    String,
    NodeType,
    (u16, u16, u16, u16),
    bool,
    Option<(u8, u8, u8)>,
);

fn node_seed_strategy() -> BoxedStrategy<NodeSeed> {
    (
        name_strategy(),
        node_type_strategy(),
        (0u16..1000, 0u16..1000, 1u16..500, 1u16..500),
        // ~1 in 8 nodes hidden
        prop::bool::weighted(0.12),
        proptest::option::of((any::<u8>(), any::<u8>(), any::<u8>())),
    )
        .boxed()
}

fn node_from_seed(seed: NodeSeed, children: Vec<RawNode>) -> RawNode {
    let (name, node_type, (x, y, w, h), hidden, fill) = seed;

    let fills = fill
        .map(|(r, g, b)| {
            vec![Paint {
                paint_type: PaintType::Solid,
                color: Some(ColorRgba {
                    r: f64::from(r) / 255.0,
                    g: f64::from(g) / 255.0,
                    b: f64::from(b) / 255.0,
                    a: 1.0,
                }),
                ..Default::default()
            }]
        })
        .unwrap_or_default();

    RawNode {
        id: String::new(), // relabeled after generation
        name,
        node_type,
        visible: hidden.then_some(false),
        absolute_bounding_box: Some(framelift::ir::Rect::new(
            f64::from(x),
            f64::from(y),
            f64::from(w),
            f64::from(h),
        )),
        fills,
        characters: (node_type == NodeType::Text).then(|| "label".to_string()),
        layout_mode: LayoutMode::None,
        children,
        ..Default::default()
    }
}

/// An arbitrary raw document tree, depth-bounded, with unique ids
/// assigned in document order.
pub fn arb_raw_tree() -> BoxedStrategy<RawNode> {
    let leaf = node_seed_strategy().prop_map(|seed| node_from_seed(seed, Vec::new()));

    leaf.prop_recursive(3, 32, 4, |inner| {
        (
            node_seed_strategy(),
            proptest::collection::vec(inner, 0..4),
        )
            .prop_map(|(seed, children)| node_from_seed(seed, children))
    })
    .prop_map(|mut root| {
        // The root itself stays visible so lowering has a real tree to
        // work with more often than not.
        root.visible = None;
        relabel_ids(&mut root, &mut 0);
        root
    })
    .boxed()
}

fn relabel_ids(node: &mut RawNode, next: &mut usize) {
    node.id = format!("n{}", *next);
    *next += 1;
    for child in &mut node.children {
        relabel_ids(child, next);
    }
}

/// Collects the ids of nodes that should be filtered away because they
/// are explicitly hidden.
pub fn hidden_ids(node: &RawNode, out: &mut Vec<String>) {
    if node.visible == Some(false) {
        out.push(node.id.clone());
    }
    for child in &node.children {
        hidden_ids(child, out);
    }
}
