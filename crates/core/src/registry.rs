//! Block type registry: lookup from a block type name to its renderer.

use crate::error::RenderError;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// A renderer for one block type.
///
/// Renderers are pure functions of the table data: they produce an HTML
/// fragment and have no other observable effect. `Send + Sync` is required
/// so a registry built at startup can be shared with batch workers.
pub trait BlockRenderer: Send + Sync {
    /// Renders the block from its (untyped) table data.
    ///
    /// Shape validation happens here, at the edge: a renderer that cannot
    /// make sense of the data returns an error instead of producing a
    /// partial fragment.
    fn render(&self, data: &JsonValue) -> Result<String, RenderError>;
}

impl<F> BlockRenderer for F
where
    F: Fn(&JsonValue) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, data: &JsonValue) -> Result<String, RenderError> {
        self(data)
    }
}

/// Static mapping from block type name to renderer.
///
/// Built once at startup and immutable afterwards for the lifetime of the
/// page; adding a block type is a registration call, never a change to the
/// mount manager.
#[derive(Default)]
pub struct Registry {
    renderers: BTreeMap<String, Box<dyn BlockRenderer>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a renderer for a block type.
    ///
    /// Re-registration overwrites the previous entry (last write wins). A
    /// duplicate almost always indicates a configuration mistake, so it is
    /// logged, but it is never an error.
    pub fn register(&mut self, block_type: impl Into<String>, renderer: impl BlockRenderer + 'static) {
        let block_type = block_type.into();
        if self
            .renderers
            .insert(block_type.clone(), Box::new(renderer))
            .is_some()
        {
            log::warn!("block type '{block_type}' registered twice; keeping the later renderer");
        }
    }

    /// Looks up the renderer for a block type.
    ///
    /// Unknown block types are an expected steady-state condition (data can
    /// ship before code during a rollout), so absence is a plain `None`.
    pub fn lookup(&self, block_type: &str) -> Option<&dyn BlockRenderer> {
        self.renderers.get(block_type).map(|renderer| renderer.as_ref())
    }

    /// Whether a renderer is registered for the block type.
    pub fn contains(&self, block_type: &str) -> bool {
        self.renderers.contains_key(block_type)
    }

    /// Iterates the registered block type names in sorted order.
    pub fn block_types(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }

    /// Number of registered block types.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("block_types", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}
