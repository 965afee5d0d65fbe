//! Batch processing types for parallel page hydration.

use crate::types::{HydrateConfig, HydrateResult};
use napi_derive::napi;
use serde_json::Value as JsonValue;

/// Input for batch processing - represents a single page to hydrate.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Page identifier (typically the route or file path).
    pub id: String,
    /// Server-rendered page HTML.
    pub html: String,
    /// Block data keyed by element id. When absent, the data is extracted
    /// from the page's inline scripts instead.
    pub data: Option<JsonValue>,
}

/// Result for a single page in a batch.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Page identifier matching the input.
    pub id: String,
    /// Hydration result (present on success).
    pub result: Option<HydrateResult>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for batch processing.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Total number of pages processed.
    pub total: u32,
    /// Number of successfully hydrated pages.
    pub succeeded: u32,
    /// Number of failed hydrations.
    pub failed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to number of CPU cores.
    pub max_threads: Option<u32>,
    /// Whether to continue processing after an error. Defaults to true.
    pub continue_on_error: Option<bool>,
    /// Hydrate configuration to use for all pages.
    pub config: Option<HydrateConfig>,
}

/// Result of batch processing containing all results and statistics.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchProcessingResult {
    /// Individual results for each input page.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}
