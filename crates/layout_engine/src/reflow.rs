//! Vertical overflow reflow
//!
//! Runs once on a freshly rendered tree. Text nodes whose content needs more
//! height than their designed box grow to fit, and every node below them (by
//! designed top edge) is pushed down by the accumulated growth, so a layout
//! without vertical overlap stays without overlap.
//!
//! The pass is not idempotent. [`reflow`] consumes a [`RenderTree`] and
//! returns a [`ReflowedTree`], which cannot be reflowed again.

use crate::TextMeasurer;
use doc_model::ElementId;
use render_model::{CanvasSize, RenderNode, RenderTree};
use serde::Serialize;

/// What reflow did to one node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeShift {
    pub id: ElementId,
    /// Downward shift applied to the node's top edge
    pub shift_px: f64,
    /// Growth of the node's own box
    pub overflow_px: f64,
}

/// Per-node outcome in processing (top-to-bottom) order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflowReport {
    pub nodes: Vec<NodeShift>,
    pub total_shift_px: f64,
}

/// A render tree after its single reflow pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReflowedTree {
    tree: RenderTree,
    reflow: ReflowReport,
}

impl ReflowedTree {
    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn report(&self) -> &ReflowReport {
        &self.reflow
    }

    pub fn canvas(&self) -> CanvasSize {
        self.tree.canvas()
    }
}

/// Node indices in processing order: ascending designed top, ties in
/// document order
fn processing_order(nodes: &[RenderNode]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| nodes[a].original_top_percent().total_cmp(&nodes[b].original_top_percent()));
    order
}

/// Grow overflowing text boxes and shift the nodes below them.
///
/// The node sequence keeps its order; only top/height overrides are set.
pub fn reflow(mut tree: RenderTree, measurer: &dyn TextMeasurer) -> ReflowedTree {
    let canvas = tree.canvas();
    let mut report = ReflowReport::default();
    let mut cumulative_shift = 0.0;

    for index in processing_order(&tree.nodes) {
        let node = &mut tree.nodes[index];
        let shift_px = cumulative_shift;
        if cumulative_shift > 0.0 {
            node.top_override_px = Some(node.original_top_percent() * canvas.height / 100.0 + cumulative_shift);
        }

        let mut overflow_px = 0.0;
        let needed = node
            .text()
            .map(|(text, style)| measurer.intrinsic_height(text, style, node.width_px(canvas)));
        if let Some(needed) = needed {
            let designed = node.height_px(canvas);
            if needed > designed {
                overflow_px = needed - designed;
                node.height_override_px = Some(needed);
                cumulative_shift += overflow_px;
            }
        }

        tracing::trace!(id = %node.id, shift_px, overflow_px, "reflowed node");
        report.nodes.push(NodeShift { id: node.id.clone(), shift_px, overflow_px });
    }

    report.total_shift_px = cumulative_shift;
    if cumulative_shift > 0.0 {
        tracing::debug!(total_shift_px = cumulative_shift, "reflow shifted content");
    }
    ReflowedTree { tree, reflow: report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeuristicMeasurer;
    use doc_model::{FontStyle, FontWeight, TextAlign};
    use proptest::prelude::*;
    use render_model::{
        ImageFit, NodeContent, OverflowWrap, PercentBox, RenderTarget, ResolvedTextStyle, WhiteSpace, LINE_HEIGHT,
    };
    use std::collections::HashMap;

    /// Measurer with a fixed intrinsic height per text
    struct FixedHeights(HashMap<String, f64>);

    impl TextMeasurer for FixedHeights {
        fn line_count(&self, _text: &str, _font_size_px: f64, _max_width_px: f64) -> usize {
            1
        }

        fn intrinsic_height(&self, text: &str, _style: &ResolvedTextStyle, _width_px: f64) -> f64 {
            self.0.get(text).copied().unwrap_or(0.0)
        }
    }

    fn style() -> ResolvedTextStyle {
        ResolvedTextStyle {
            font_size_px: 10.0,
            font_family: None,
            color: "#000000".into(),
            text_align: TextAlign::Right,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            line_height: LINE_HEIGHT,
            white_space: WhiteSpace::PreWrap,
            overflow_wrap: OverflowWrap::BreakWord,
        }
    }

    fn text_node(id: &str, top: f64, height: f64) -> RenderNode {
        RenderNode {
            id: id.into(),
            frame: PercentBox { right: 10.0, top, width: 50.0, height },
            top_override_px: None,
            height_override_px: None,
            content: NodeContent::Text { text: id.to_string(), style: style() },
        }
    }

    fn image_node(id: &str, top: f64, height: f64) -> RenderNode {
        RenderNode {
            content: NodeContent::Image { source: String::new(), fit: ImageFit::Contain },
            ..text_node(id, top, height)
        }
    }

    /// 1000 x 1000 canvas: 1% = 10px
    fn tree(nodes: Vec<RenderNode>) -> RenderTree {
        RenderTree { target: RenderTarget::preview(1000.0, 1000.0), nodes, message: None }
    }

    fn heights(pairs: &[(&str, f64)]) -> FixedHeights {
        FixedHeights(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    #[test]
    fn test_overflow_pushes_following_nodes() {
        // document order differs from top order on purpose
        let input = tree(vec![
            text_node("c", 50.0, 10.0),
            text_node("a", 10.0, 10.0),
            image_node("b", 30.0, 10.0),
        ]);
        let out = reflow(input, &heights(&[("a", 130.0), ("c", 100.0)]));
        let t = out.tree();
        let canvas = t.canvas();

        assert_eq!(t.nodes.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(), vec!["c", "a", "b"]);
        let a = t.get(&"a".into()).unwrap();
        assert_eq!(a.top_px(canvas), 100.0);
        assert_eq!(a.height_px(canvas), 130.0);
        let b = t.get(&"b".into()).unwrap();
        assert_eq!(b.top_override_px, Some(330.0));
        assert_eq!(b.height_override_px, None);
        let c = t.get(&"c".into()).unwrap();
        assert_eq!(c.top_px(canvas), 530.0);
        assert_eq!(c.height_override_px, None);
        assert_eq!(out.report().total_shift_px, 30.0);
    }

    #[test]
    fn test_no_overflow_leaves_tree_alone() {
        let input = tree(vec![text_node("a", 10.0, 10.0), text_node("b", 40.0, 10.0)]);
        let out = reflow(input.clone(), &heights(&[("a", 40.0)]));
        assert_eq!(out.tree(), &input);
        assert!(out.report().nodes.iter().all(|n| n.shift_px == 0.0));
    }

    #[test]
    fn test_ties_keep_document_order() {
        let input = tree(vec![text_node("first", 10.0, 10.0), text_node("second", 10.0, 10.0)]);
        let out = reflow(input, &heights(&[("first", 150.0), ("second", 150.0)]));
        let order: Vec<&str> = out.report().nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["first", "second"]);
        assert_eq!(out.tree().get(&"second".into()).unwrap().top_override_px, Some(150.0));
    }

    #[test]
    fn test_placeholder_tree_passes_through() {
        let input = RenderTree::placeholder(RenderTarget::export_a4());
        let out = reflow(input.clone(), &HeuristicMeasurer::default());
        assert_eq!(out.tree(), &input);
    }

    #[test]
    fn test_removes_overlap_with_heuristic_measurer() {
        let mut long = text_node("long", 10.0, 2.0);
        long.content = NodeContent::Text { text: "سطر\nسطر\nسطر\nسطر".into(), style: style() };
        let input = tree(vec![long, text_node("next", 12.0, 5.0)]);
        let out = reflow(input, &HeuristicMeasurer::default());
        let canvas = out.canvas();
        let long = out.tree().nodes[0].pixel_rect(canvas);
        let next = out.tree().nodes[1].pixel_rect(canvas);
        assert_eq!(long.height, 60.0);
        assert!(next.top >= long.bottom());
    }

    proptest! {
        #[test]
        fn prop_reflow_shift_is_prefix_sum(
            specs in prop::collection::vec((0u32..90, 1u32..10, 0u32..200), 1..12)
        ) {
            let nodes: Vec<RenderNode> = specs
                .iter()
                .enumerate()
                .map(|(i, (top, h, _))| text_node(&format!("n{i}"), *top as f64, *h as f64))
                .collect();
            let fixed = FixedHeights(
                specs
                    .iter()
                    .enumerate()
                    .map(|(i, (_, h, extra))| (format!("n{i}"), *h as f64 * 10.0 + *extra as f64))
                    .collect(),
            );
            let input = tree(nodes);
            let ids_before: Vec<ElementId> = input.nodes.iter().map(|n| n.id.clone()).collect();
            let order = processing_order(&input.nodes);
            let out = reflow(input, &fixed);
            let canvas = out.canvas();

            let ids_after: Vec<ElementId> = out.tree().nodes.iter().map(|n| n.id.clone()).collect();
            prop_assert_eq!(ids_before, ids_after);

            let mut expected_shift = 0.0;
            for index in order {
                let (top, _, extra) = specs[index];
                let node = &out.tree().nodes[index];
                prop_assert!((node.top_px(canvas) - (top as f64 * 10.0 + expected_shift)).abs() < 1e-9);
                expected_shift += extra as f64;
            }
            prop_assert!((out.report().total_shift_px - expected_shift).abs() < 1e-9);
        }
    }
}
