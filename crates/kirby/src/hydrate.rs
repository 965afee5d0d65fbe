//! Single-pass hydration of a server-rendered page.
//!
//! This is the streaming counterpart of one mount pass: the page HTML goes
//! through an lol_html rewriter with one handler per registered block type,
//! and each unmounted container receives its rendered fragment plus the
//! mounted marker. Containers without data, without a renderer, or whose
//! renderer fails are passed through untouched, so a later client-side pass
//! can still pick them up.

use blockmount_core::{
    ContainerIdentity, DataSource, MOUNTED_VALUE, MountFailure, MountedBlock, Registry,
    block_type_of_class, container_class,
};
use lol_html::html_content::ContentType;
use lol_html::{ElementContentHandlers, RewriteStrSettings, Selector, rewrite_str};
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use thiserror::Error;

/// Options for a hydration pass.
#[derive(Debug, Clone)]
pub struct HydrateOptions {
    /// Marker attribute written on hydrated containers.
    pub marker: String,
}

impl Default for HydrateOptions {
    fn default() -> Self {
        Self {
            marker: blockmount_core::MOUNTED_MARKER.to_string(),
        }
    }
}

/// What one hydration pass did, with the same taxonomy as a mount pass.
#[derive(Debug, Default)]
pub struct HydrateSummary {
    /// Containers hydrated, in document order.
    pub mounted: Vec<MountedBlock>,
    /// Containers whose renderer failed; left untouched.
    pub failed: Vec<MountFailure>,
    /// Element ids of containers with no data table entry.
    pub missing_data: Vec<String>,
    /// Block types seen in the page without a registry entry.
    pub unregistered: Vec<String>,
    /// Containers skipped because their identity could not be derived.
    pub malformed: Vec<String>,
}

/// A hydrated page plus its summary.
#[derive(Debug)]
pub struct HydrateOutput {
    /// The rewritten page HTML.
    pub html: String,
    /// What happened to each container.
    pub summary: HydrateSummary,
}

/// Errors from the hydration pipeline itself.
///
/// Per-container problems never surface here; they land in the summary.
#[derive(Debug, Error)]
pub enum HydrateError {
    /// A block type name does not form a valid container selector.
    #[error("invalid container selector for block type '{block_type}': {message}")]
    Selector {
        /// The offending block type.
        block_type: String,
        /// Parser message.
        message: String,
    },
    /// The HTML rewriter failed on the document itself.
    #[error("html rewriting failed: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}

fn container_selector(block_type: &str) -> Result<Selector, HydrateError> {
    format!(".{}", container_class(block_type))
        .parse()
        .map_err(|err: lol_html::errors::SelectorError| HydrateError::Selector {
            block_type: block_type.to_string(),
            message: err.to_string(),
        })
}

/// Runs one hydration pass over a server-rendered page.
pub fn hydrate_page(
    html: &str,
    registry: &Registry,
    data: &dyn DataSource,
    options: &HydrateOptions,
) -> Result<HydrateOutput, HydrateError> {
    let summary = Rc::new(RefCell::new(HydrateSummary::default()));
    let seen_unregistered = Rc::new(RefCell::new(HashSet::<String>::new()));
    let mut handlers: Vec<(Cow<'_, Selector>, ElementContentHandlers<'_>)> = Vec::new();

    for block_type in registry.block_types() {
        let selector = container_selector(block_type)?;
        let summary = Rc::clone(&summary);
        let marker = options.marker.clone();
        let block_type = block_type.to_string();
        handlers.push((
            Cow::Owned(selector),
            ElementContentHandlers::default().element(move |el: &mut lol_html::html_content::Element| {
                if el.get_attribute(&marker).is_some() {
                    return Ok(());
                }
                let Some(element_id) = el.get_attribute("id") else {
                    summary
                        .borrow_mut()
                        .malformed
                        .push(format!("<{} container without id>", block_type));
                    return Ok(());
                };
                if ContainerIdentity::parse(&element_id, &block_type).is_none() {
                    summary.borrow_mut().malformed.push(element_id);
                    return Ok(());
                }
                let Some(payload) = data.block_data(&element_id) else {
                    summary.borrow_mut().missing_data.push(element_id);
                    return Ok(());
                };
                let Some(renderer) = registry.lookup(&block_type) else {
                    return Ok(());
                };
                match renderer.render(&payload) {
                    Ok(fragment) => {
                        el.set_inner_content(&fragment, ContentType::Html);
                        el.set_attribute(&marker, MOUNTED_VALUE)?;
                        log::debug!("hydrated {block_type} block: {element_id}");
                        summary.borrow_mut().mounted.push(MountedBlock {
                            element_id,
                            block_type: block_type.clone(),
                        });
                    }
                    Err(error) => {
                        log::error!(
                            "renderer for {block_type} block '{element_id}' failed: {error}"
                        );
                        summary.borrow_mut().failed.push(MountFailure {
                            element_id,
                            block_type: block_type.clone(),
                            error,
                        });
                    }
                }
                Ok(())
            }),
        ));
    }

    // Containers whose type has no renderer yet still get reported, which
    // matters during rollouts where content ships before code.
    {
        let selector: Selector = "[class*=\"-container\"]".parse().map_err(
            |err: lol_html::errors::SelectorError| HydrateError::Selector {
                block_type: "*".to_string(),
                message: err.to_string(),
            },
        )?;
        let summary = Rc::clone(&summary);
        let seen = Rc::clone(&seen_unregistered);
        let marker = options.marker.clone();
        let known: HashSet<String> = registry.block_types().map(str::to_string).collect();
        handlers.push((
            Cow::Owned(selector),
            ElementContentHandlers::default().element(move |el: &mut lol_html::html_content::Element| {
                if el.get_attribute(&marker).is_some() {
                    return Ok(());
                }
                let classes = el.get_attribute("class").unwrap_or_default();
                let Some(block_type) = classes.split_whitespace().find_map(block_type_of_class)
                else {
                    return Ok(());
                };
                if !known.contains(block_type) && seen.borrow_mut().insert(block_type.to_string())
                {
                    log::debug!("no renderer registered for block type '{block_type}'");
                    summary.borrow_mut().unregistered.push(block_type.to_string());
                }
                Ok(())
            }),
        ));
    }

    let html = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::default()
        },
    )?;

    let summary = std::mem::take(&mut *summary.borrow_mut());
    Ok(HydrateOutput { html, summary })
}
