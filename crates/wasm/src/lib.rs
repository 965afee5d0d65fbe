use serde::Serialize;
use serde_json::Value as JsonValue;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use blockmount_core::DataTable;
use blockmount_kirby::{HydrateOptions, default_block_registry, default_block_types, hydrate_page};

// ============================================================================
// Hydrate Config
// ============================================================================

/// Configuration accepted by the WASM hydrate function.
/// Mirrors the NAPI `HydrateConfig` for parity.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct WasmHydrateConfig {
    #[serde(default, alias = "mountedMarker")]
    pub mounted_marker: Option<String>,
}

fn parse_config(config: JsValue) -> WasmHydrateConfig {
    if config.is_undefined() || config.is_null() {
        return WasmHydrateConfig::default();
    }
    serde_wasm_bindgen::from_value(config).unwrap_or_default()
}

fn parse_table(data: JsValue) -> Result<DataTable, JsError> {
    if data.is_undefined() || data.is_null() {
        return Ok(DataTable::new());
    }
    let value: JsonValue = serde_wasm_bindgen::from_value(data)
        .map_err(|e| JsError::new(&format!("Invalid block data: {e}")))?;
    DataTable::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// ============================================================================
// Hydrate API Types
// ============================================================================

/// One hydrated container.
#[derive(Debug, Clone, Serialize)]
pub struct MountedEntry {
    /// The container's element id.
    pub element_id: String,
    /// The container's block type.
    pub block_type: String,
}

/// Result of hydrating a page.
#[derive(Debug, Clone, Serialize)]
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

// ============================================================================
// Hydrate API
// ============================================================================

/// Hydrates a server-rendered page against the default block registry.
///
/// Each unmounted `{type}-container` element whose data is present in
/// `data` receives its rendered fragment plus the mounted marker attribute;
/// everything else passes through untouched.
///
/// # Arguments
///
/// * `html` - The full page HTML
/// * `data` - Block data object keyed by element id (or null/undefined)
/// * `config` - Optional configuration (JsValue), e.g. `{mountedMarker}`
///
/// # Returns
///
/// Returns a `HydrateResult` with the rewritten HTML and a summary of what
/// was mounted, skipped, or failed.
#[wasm_bindgen]
pub fn hydrate(html: &str, data: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let cfg = parse_config(config);
    let table = parse_table(data)?;
    let registry = default_block_registry();

    let mut options = HydrateOptions::default();
    if let Some(marker) = cfg.mounted_marker {
        options.marker = marker;
    }

    let output = hydrate_page(html, &registry, &table, &options)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let result = HydrateResult {
        html: output.html,
        mounted: output
            .summary
            .mounted
            .into_iter()
            .map(|m| MountedEntry {
                element_id: m.element_id,
                block_type: m.block_type,
            })
            .collect(),
        missing_data: output.summary.missing_data,
        unregistered: output.summary.unregistered,
        errors: output
            .summary
            .failed
            .iter()
            .map(|f| format!("{}: {}", f.element_id, f.error))
            .collect(),
    };

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ============================================================================
// Data Extraction API
// ============================================================================

/// Extracts the inline `window.blockData` assignments from a page.
///
/// Returns the recovered table as a plain object keyed by element id, the
/// same shape the `hydrate` function accepts.
#[wasm_bindgen]
pub fn extract_block_data(html: &str) -> Result<JsValue, JsError> {
    let table =
        blockmount_kirby::extract_block_data(html).map_err(|e| JsError::new(&e.to_string()))?;

    let object: serde_json::Map<String, JsonValue> = table
        .iter()
        .map(|(id, payload)| (id.to_string(), payload.clone()))
        .collect();

    serde_wasm_bindgen::to_value(&object)
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

/// Returns the block type names covered by the default registry.
#[wasm_bindgen]
pub fn registered_block_types() -> Result<JsValue, JsError> {
    let types: Vec<String> = default_block_types()
        .into_iter()
        .map(str::to_string)
        .collect();
    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}
