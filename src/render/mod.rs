//! The tree renderer: walks a backend node tree and produces the abstract
//! element tree a host shell displays.
//!
//! A [`Renderer`] is built once per host (registry, store, navigator) and
//! used for every screen. Each [`Renderer::render`] call produces a
//! [`RenderedTree`] that owns the pass's scheduled effects; dropping the tree
//! tears them down.

mod effects;
mod engine;
mod formatter;
pub mod renderers;

pub use renderers::NodeRenderer;

use ahash::AHashMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicU32;

use crate::client::ScreenDocument;
use crate::dispatch::{Navigator, NullNavigator};
use crate::element::{Element, PressIntent};
use crate::error::RegistryError;
use crate::node::UiNode;
use crate::store::FormStore;
use effects::EffectSet;
use engine::RenderEngine;
use renderers::{create_renderer_by_name, register_default_renderers};

/// Ambient data node renderers work against during one pass.
pub struct RenderContext<'a> {
    store: &'a FormStore,
    context: &'a Map<String, Value>,
    effects: &'a EffectSet,
    navigator: &'a Arc<dyn Navigator>,
}

impl<'a> RenderContext<'a> {
    pub fn store(&self) -> &FormStore {
        self.store
    }

    /// Read-only data the backend sent alongside the node tree.
    pub fn context(&self) -> &Map<String, Value> {
        self.context
    }

    /// The press intent for an interactive node: its action descriptor plus
    /// the node data and screen context the command bus payload carries.
    pub fn press_intent(&self, node: &UiNode) -> Option<PressIntent> {
        node.action().map(|action| PressIntent {
            action,
            node_data: node.data.clone(),
            context: self.context.clone(),
        })
    }

    /// Schedules a one-shot replace-navigation owned by this pass's tree.
    pub fn schedule_replace(&self, route: String, after_ms: u64) {
        self.effects
            .schedule_replace(Arc::clone(self.navigator), route, after_ms);
    }

    /// Starts a once-per-second countdown owned by this pass's tree.
    pub fn start_countdown(&self, seconds: u32) -> Arc<AtomicU32> {
        self.effects.start_countdown(seconds)
    }
}

/// The output of one render pass. Holds the element tree and every scheduled
/// effect; dropping it cancels pending navigations and countdown tickers.
pub struct RenderedTree {
    roots: Vec<Element>,
    #[allow(dead_code)]
    effects: EffectSet,
}

impl RenderedTree {
    pub fn roots(&self) -> &[Element] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first traversal over every element in the tree.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.roots.iter().flat_map(Element::walk)
    }
}

impl fmt::Display for RenderedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter::fmt_roots(&self.roots, f)
    }
}

/// Renders backend node trees against a fixed node-type registry.
pub struct Renderer {
    registry: AHashMap<String, Box<dyn NodeRenderer>>,
    store: FormStore,
    navigator: Arc<dyn Navigator>,
}

impl Renderer {
    pub fn builder(store: FormStore) -> RendererBuilder {
        RendererBuilder::new(store)
    }

    /// Renders one screen's node tree. Structural parity holds: one element
    /// per recognized node (none for unknown or effect-only nodes), children
    /// in input order. Data-shape problems degrade; they never fail the pass.
    pub fn render(&self, ui: &[UiNode], context: &Map<String, Value>) -> RenderedTree {
        let effects = EffectSet::new();
        let roots = {
            let cx = RenderContext {
                store: &self.store,
                context,
                effects: &effects,
                navigator: &self.navigator,
            };
            RenderEngine::new(&self.registry).render_nodes(ui, &cx)
        };
        RenderedTree { roots, effects }
    }

    pub fn render_document(&self, document: &ScreenDocument) -> RenderedTree {
        self.render(&document.ui, &document.data)
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }
}

/// Assembles a [`Renderer`]. The registry is immutable once built; duplicate
/// registrations and dangling aliases fail here, never during a render pass.
pub struct RendererBuilder {
    registry: AHashMap<String, Box<dyn NodeRenderer>>,
    store: FormStore,
    navigator: Option<Arc<dyn Navigator>>,
}

impl RendererBuilder {
    fn new(store: FormStore) -> Self {
        let mut registry: AHashMap<String, Box<dyn NodeRenderer>> = AHashMap::new();
        register_default_renderers(&mut registry);
        Self {
            registry,
            store,
            navigator: None,
        }
    }

    /// Installs the navigator scheduled navigations go through. Without one,
    /// routes are logged and dropped.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Registers a custom renderer for a node type the built-in set does not
    /// cover.
    pub fn with_renderer(mut self, renderer: Box<dyn NodeRenderer>) -> Result<Self, RegistryError> {
        let key = renderer.node_type().to_string();
        if self.registry.contains_key(&key) {
            return Err(RegistryError::DuplicateType(key));
        }
        self.registry.insert(key, renderer);
        Ok(self)
    }

    /// Maps an additional backend type string onto a built-in renderer, the
    /// way `FOOTER_NOTE` rides on `TEXT`.
    pub fn with_type_alias(mut self, alias: &str, target: &str) -> Result<Self, RegistryError> {
        if self.registry.contains_key(alias) {
            return Err(RegistryError::DuplicateType(alias.to_string()));
        }
        let renderer =
            create_renderer_by_name(target).ok_or_else(|| RegistryError::UnknownAliasTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            })?;
        self.registry.insert(alias.to_string(), renderer);
        Ok(self)
    }

    pub fn build(self) -> Renderer {
        Renderer {
            registry: self.registry,
            store: self.store,
            navigator: self
                .navigator
                .unwrap_or_else(|| Arc::new(NullNavigator)),
        }
    }
}
