//! NAPI-exposed data structures.

use napi_derive::napi;
use serde_json::Value as JsonValue;

/// Options accepted by the hydrate functions.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct HydrateConfig {
    /// Marker attribute written on hydrated containers. Defaults to
    /// `data-mounted`.
    pub mounted_marker: Option<String>,
}

/// One hydrated container.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct MountedEntry {
    /// The container's element id.
    pub element_id: String,
    /// The container's block type.
    pub block_type: String,
}

/// Result of hydrating one page.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct HydrateResult {
    /// The rewritten page HTML.
    pub html: String,
    /// Containers hydrated, in document order.
    pub mounted: Vec<MountedEntry>,
    /// Element ids of containers with no data table entry.
    pub missing_data: Vec<String>,
    /// Block types present in the page without a registered renderer.
    pub unregistered: Vec<String>,
    /// Per-container renderer failures as `"elementId: message"` strings.
    pub errors: Vec<String>,
}

/// Extracted block data plus any extraction errors.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct ExtractResult {
    /// The recovered table as a plain object keyed by element id.
    pub data: JsonValue,
    /// Any errors surfaced by the extractor.
    pub errors: Vec<String>,
}
