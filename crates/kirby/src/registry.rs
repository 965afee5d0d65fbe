//! Default block registry wiring.
//!
//! Adding a block type to the site means adding its module under
//! [`crate::blocks`] and one entry here; the mount manager and the
//! hydration pass pick it up without changes.

use crate::blocks;
use blockmount_core::{Registry, RenderError};
use serde_json::Value as JsonValue;

type RenderFn = fn(&JsonValue) -> Result<String, RenderError>;

const DEFAULT_BLOCKS: &[(&str, RenderFn)] = &[
    ("authorbox", blocks::authorbox::render),
    ("blog", blocks::blog::render),
    ("featuredblog", blocks::featuredblog::render),
    ("footer", blocks::footer::render),
    ("hero", blocks::hero::render),
    ("latestblog", blocks::latestblog::render),
    ("navbar", blocks::navbar::render),
    ("textblock", blocks::textblock::render),
];

/// Creates the registry with every block type the site ships.
pub fn default_block_registry() -> Registry {
    let mut registry = Registry::new();
    for (block_type, render) in DEFAULT_BLOCKS {
        registry.register(*block_type, *render);
    }
    registry
}

/// Returns the block type names covered by the default registry.
pub fn default_block_types() -> Vec<&'static str> {
    DEFAULT_BLOCKS.iter().map(|(name, _)| *name).collect()
}
