//! The recursive tree walk.

use ahash::AHashMap;
use tracing::warn;

use super::RenderContext;
use super::renderers::NodeRenderer;
use crate::element::Element;
use crate::node::UiNode;

/// Walks a node tree against a registry, producing elements in document
/// order. Unknown node types are dropped (subtree included) without failing
/// the pass; each drop is recorded for backend-contract drift detection.
pub(super) struct RenderEngine<'a> {
    registry: &'a AHashMap<String, Box<dyn NodeRenderer>>,
}

impl<'a> RenderEngine<'a> {
    pub(super) fn new(registry: &'a AHashMap<String, Box<dyn NodeRenderer>>) -> Self {
        Self { registry }
    }

    pub(super) fn render_nodes(&self, nodes: &[UiNode], cx: &RenderContext<'_>) -> Vec<Element> {
        nodes
            .iter()
            .filter_map(|node| self.render_node(node, cx))
            .collect()
    }

    fn render_node(&self, node: &UiNode, cx: &RenderContext<'_>) -> Option<Element> {
        let Some(renderer) = self.registry.get(node.node_type.as_str()) else {
            warn!(node_type = %node.node_type, "Unknown node type; node omitted");
            return None;
        };
        let children = self.render_nodes(&node.children, cx);
        renderer.render(node, children, cx)
    }
}
