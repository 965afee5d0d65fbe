#![deny(missing_docs)]
//! Node.js bindings that surface blockmount's Rust implementation.

use napi_derive::napi;
use rayon::prelude::*;
use serde_json::Value as JsonValue;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use blockmount_core::{DataTable, Registry};
use blockmount_kirby::{HydrateOptions, default_block_registry, default_block_types};

/// Batch processing types.
pub mod batch;
/// NAPI-exposed data structures.
pub mod types;

pub use batch::*;
pub use types::*;

fn build_options(config: Option<&HydrateConfig>) -> HydrateOptions {
    let mut options = HydrateOptions::default();
    if let Some(marker) = config.and_then(|c| c.mounted_marker.clone()) {
        options.marker = marker;
    }
    options
}

fn build_table(html: &str, data: Option<JsonValue>) -> Result<DataTable, String> {
    match data {
        Some(value) => DataTable::from_value(value).map_err(|e| e.to_string()),
        None => blockmount_kirby::extract_block_data(html).map_err(|e| e.to_string()),
    }
}

fn run_hydrate(
    registry: &Registry,
    html: &str,
    data: Option<JsonValue>,
    options: &HydrateOptions,
) -> Result<HydrateResult, String> {
    let table = build_table(html, data)?;
    let output = blockmount_kirby::hydrate_page(html, registry, &table, options)
        .map_err(|e| e.to_string())?;

    Ok(HydrateResult {
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
    })
}

/// Hydrates one server-rendered page against the default block registry.
///
/// When `data` is omitted, the block data is extracted from the page's own
/// inline `window.blockData` scripts first.
#[napi]
pub fn hydrate_page(
    html: String,
    data: Option<JsonValue>,
    config: Option<HydrateConfig>,
) -> napi::Result<HydrateResult> {
    let registry = default_block_registry();
    let options = build_options(config.as_ref());
    run_hydrate(&registry, &html, data, &options).map_err(napi::Error::from_reason)
}

/// Extracts the inline `window.blockData` assignments from a page.
#[napi]
pub fn extract_block_data(html: String) -> napi::Result<ExtractResult> {
    match blockmount_kirby::extract_block_data(&html) {
        Ok(table) => {
            let object: serde_json::Map<String, JsonValue> = table
                .iter()
                .map(|(id, payload)| (id.to_string(), payload.clone()))
                .collect();
            Ok(ExtractResult {
                data: JsonValue::Object(object),
                errors: Vec::new(),
            })
        }
        Err(err) => Ok(ExtractResult {
            data: JsonValue::Object(Default::default()),
            errors: vec![err.to_string()],
        }),
    }
}

/// Returns the block type names covered by the default registry.
#[napi]
pub fn registered_block_types() -> Vec<String> {
    default_block_types().into_iter().map(str::to_string).collect()
}

/// Hydrates a batch of pages in parallel.
///
/// Pages are processed on a rayon thread pool; one page failing never stops
/// the others unless `continue_on_error` is set to false, in which case the
/// batch reports the first error after finishing.
#[napi]
pub fn hydrate_batch(
    inputs: Vec<BatchInput>,
    options: Option<BatchOptions>,
) -> napi::Result<BatchProcessingResult> {
    let opts = options.unwrap_or_default();
    let hydrate_options = build_options(opts.config.as_ref());
    let registry = default_block_registry();

    // Configure thread pool if max_threads is specified
    let pool = if let Some(max_threads) = opts.max_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads as usize)
            .build()
            .ok()
    } else {
        None
    };

    let started = Instant::now();
    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        match run_hydrate(&registry, &input.html, input.data, &hydrate_options) {
            Ok(result) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    result: Some(result),
                    error: None,
                }
            }
            Err(e) => {
                failed.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    result: None,
                    error: Some(e),
                }
            }
        }
    };

    let results: Vec<BatchResult> = match &pool {
        Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
        None => inputs.into_par_iter().map(process_input).collect(),
    };

    let stats = BatchStats {
        total,
        succeeded: succeeded.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
        processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
    };

    if !opts.continue_on_error.unwrap_or(true)
        && let Some(first) = results.iter().find_map(|r| r.error.as_deref())
    {
        return Err(napi::Error::from_reason(first.to_string()));
    }

    Ok(BatchProcessingResult { results, stats })
}
