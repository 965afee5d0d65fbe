#![deny(missing_docs)]
//! Blockmount Kirby engine: typed block renderers, the default registry,
//! and single-pass hydration of server-rendered pages.

/// Typed renderers for the site's block types.
pub mod blocks;
/// Inline `window.blockData` script extraction and emission.
pub mod data_script;
/// Single-pass page hydration over server HTML.
pub mod hydrate;
/// Escaping and markup helpers shared by the renderers.
mod markup;
/// Default block registry wiring.
pub mod registry;
/// Site-wide context merged into every block payload.
pub mod site;

pub use data_script::{DataScriptError, emit_data_script, extract_block_data};
pub use hydrate::{HydrateError, HydrateOptions, HydrateOutput, HydrateSummary, hydrate_page};
pub use registry::{default_block_registry, default_block_types};
pub use site::{LanguageInfo, SiteContext, SiteInfo, SitePage};
