//! The mount manager: bridges `(container, data)` pairs to renderer
//! instantiation, exactly once per container.
//!
//! Containers move through `unseen → seen/unmounted → mounted`; `mounted`
//! is terminal for an element's identity. The marker attribute is both the
//! idempotency guard and an externally observable signal that a block has
//! been hydrated. A container that loses the race for data or renderer is
//! simply left unmarked, so a later pass can pick it up.

use crate::container::{self, ContainerIdentity, MOUNTED_MARKER, MOUNTED_VALUE};
use crate::data::DataSource;
use crate::dom::{Document, NodeKey};
use crate::error::RenderError;
use crate::registry::Registry;
use std::collections::HashSet;

/// One successfully mounted container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedBlock {
    /// The container's element id.
    pub element_id: String,
    /// The container's block type.
    pub block_type: String,
}

/// A renderer failure contained at its container boundary.
#[derive(Debug)]
pub struct MountFailure {
    /// The container's element id.
    pub element_id: String,
    /// The container's block type.
    pub block_type: String,
    /// The error the renderer returned.
    pub error: RenderError,
}

/// Outcome of one scan-and-mount pass.
#[derive(Debug, Default)]
pub struct PassReport {
    /// Containers mounted during this pass, in document order.
    pub mounted: Vec<MountedBlock>,
    /// Containers whose renderer failed; left unmounted and retryable.
    pub failed: Vec<MountFailure>,
    /// Element ids of containers with no data table entry yet.
    pub missing_data: Vec<String>,
    /// Block types observed in the document without a registry entry.
    pub unregistered: Vec<String>,
}

impl PassReport {
    /// Whether the pass neither mounted anything nor observed a failure.
    pub fn is_quiet(&self) -> bool {
        self.mounted.is_empty() && self.failed.is_empty()
    }
}

struct Candidate {
    key: NodeKey,
    block_type: String,
    element_id: Option<String>,
}

/// Mounts registered renderers into unmounted containers, exactly once each.
pub struct MountManager {
    registry: Registry,
    data: Box<dyn DataSource>,
    marker: String,
    active: bool,
    serviced_revision: Option<u64>,
    warned_malformed: HashSet<NodeKey>,
    warned_unregistered: HashSet<String>,
}

impl MountManager {
    /// Creates a manager over an injected registry and data source.
    pub fn new(registry: Registry, data: Box<dyn DataSource>) -> Self {
        Self {
            registry,
            data,
            marker: MOUNTED_MARKER.to_string(),
            active: true,
            serviced_revision: None,
            warned_malformed: HashSet::new(),
            warned_unregistered: HashSet::new(),
        }
    }

    /// Overrides the mounted-marker attribute name.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// The marker attribute written on mounted containers.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether the manager is still observing (i.e. not torn down).
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stops the manager permanently.
    ///
    /// After teardown no trigger runs another pass and no container changes
    /// state, even if some are still unmounted. There is no way to restart;
    /// hosts build a fresh manager instead.
    pub fn teardown(&mut self) {
        self.active = false;
    }

    /// Runs one full scan-and-mount pass. Returns `None` after teardown.
    pub fn run_pass(&mut self, doc: &mut Document) -> Option<PassReport> {
        if !self.active {
            return None;
        }
        Some(self.pass(doc))
    }

    /// Services pending document mutations.
    ///
    /// Runs a pass only when the structural revision advanced since the
    /// last pass, so any number of mutations between calls coalesce into
    /// one scan. Mutations made by a pass itself (attaching rendered HTML)
    /// are folded into the revision recorded afterwards and are not
    /// re-serviced. Returns `None` when nothing changed or after teardown.
    pub fn service(&mut self, doc: &mut Document) -> Option<PassReport> {
        if !self.active || self.serviced_revision == Some(doc.revision()) {
            return None;
        }
        Some(self.pass(doc))
    }

    /// Retries unmounted containers after the data source gained entries.
    ///
    /// Data arriving later than its container is not a document mutation,
    /// so it needs its own trigger; relying on unrelated DOM churn to
    /// eventually re-scan would leave containers stuck on quiet pages.
    /// Returns `None` after teardown.
    pub fn data_changed(&mut self, doc: &mut Document) -> Option<PassReport> {
        if !self.active {
            return None;
        }
        Some(self.pass(doc))
    }

    fn pass(&mut self, doc: &mut Document) -> PassReport {
        let mut report = PassReport::default();

        for candidate in self.collect_candidates(doc) {
            // The collection filter already excluded marked elements; the
            // re-check guards against duplicate ids aliasing one another.
            let marked = doc
                .find_by_key(candidate.key)
                .is_none_or(|el| el.attribute(&self.marker).is_some());
            if marked {
                continue;
            }

            if !self.registry.contains(&candidate.block_type) {
                if self.warned_unregistered.insert(candidate.block_type.clone()) {
                    log::debug!(
                        "no renderer registered for block type '{}'; leaving containers unmounted",
                        candidate.block_type
                    );
                }
                if !report.unregistered.contains(&candidate.block_type) {
                    report.unregistered.push(candidate.block_type);
                }
                continue;
            }

            let Some(element_id) = candidate.element_id else {
                self.warn_malformed(candidate.key, &candidate.block_type, "missing element id");
                continue;
            };

            if ContainerIdentity::parse(&element_id, &candidate.block_type).is_none() {
                self.warn_malformed(
                    candidate.key,
                    &candidate.block_type,
                    "element id does not follow the '{type}-{instance}' form",
                );
                continue;
            }

            let Some(data) = self.data.block_data(&element_id) else {
                report.missing_data.push(element_id);
                continue;
            };

            let Some(renderer) = self.registry.lookup(&candidate.block_type) else {
                continue;
            };
            match renderer.render(&data) {
                Ok(html) => {
                    if doc.set_inner_html_at(candidate.key, html).is_err()
                        || doc
                            .set_attribute_at(candidate.key, self.marker.clone(), MOUNTED_VALUE)
                            .is_err()
                    {
                        log::error!("container '{element_id}' vanished mid-pass; skipping");
                        continue;
                    }
                    log::debug!("mounted {} block: {element_id}", candidate.block_type);
                    report.mounted.push(MountedBlock {
                        element_id,
                        block_type: candidate.block_type,
                    });
                }
                Err(error) => {
                    log::error!(
                        "renderer for {} block '{element_id}' failed: {error}",
                        candidate.block_type
                    );
                    report.failed.push(MountFailure {
                        element_id,
                        block_type: candidate.block_type,
                        error,
                    });
                }
            }
        }

        self.serviced_revision = Some(doc.revision());
        report
    }

    /// One walk over the document, filtered on the marker first so the cost
    /// of a pass is proportional to new containers, not total containers.
    fn collect_candidates(&self, doc: &Document) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        doc.each_element(|el| {
            if el.attribute(&self.marker).is_some() {
                return;
            }
            let Some(block_type) = el
                .classes()
                .find_map(container::block_type_of_class)
            else {
                return;
            };
            let Some(key) = el.key() else {
                return;
            };
            candidates.push(Candidate {
                key,
                block_type: block_type.to_string(),
                element_id: el.id().map(str::to_string),
            });
        });
        candidates
    }

    fn warn_malformed(&mut self, key: NodeKey, block_type: &str, reason: &str) {
        if self.warned_malformed.insert(key) {
            log::warn!("skipping malformed {block_type} container: {reason}");
        }
    }
}

impl std::fmt::Debug for MountManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountManager")
            .field("registry", &self.registry)
            .field("marker", &self.marker)
            .field("active", &self.active)
            .field("serviced_revision", &self.serviced_revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataTable, SharedDataTable};
    use crate::dom::Element;
    use serde_json::{Value as JsonValue, json};
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn container(block_type: &str, instance: u32) -> Element {
        Element::new("div")
            .with_id(format!("{block_type}-{instance}"))
            .with_class(format!("{block_type}-container"))
    }

    fn counting_renderer(
        calls: Arc<AtomicU32>,
    ) -> impl Fn(&JsonValue) -> Result<String, RenderError> + Send + Sync {
        move |_| {
            calls.fetch_add(1, Ordering::Relaxed);
            Ok("<p>rendered</p>".to_string())
        }
    }

    fn fixed_renderer(
        html: &'static str,
    ) -> impl Fn(&JsonValue) -> Result<String, RenderError> + Send + Sync {
        move |_| Ok(html.to_string())
    }

    #[test]
    fn mounts_container_with_data_and_renderer() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let mut registry = Registry::new();
        registry.register("hero", move |data: &JsonValue| {
            sink.lock().expect("sink lock").push(data.clone());
            Ok::<_, RenderError>("<h1>Welcome</h1>".to_string())
        });

        let mut table = DataTable::new();
        table.insert("hero-1", json!({"title": "Welcome"}));

        let mut doc = Document::new();
        doc.append_to_body(container("hero", 1));

        let mut manager = MountManager::new(registry, Box::new(table));
        let report = manager.run_pass(&mut doc).expect("manager active");

        assert_eq!(
            report.mounted,
            vec![MountedBlock {
                element_id: "hero-1".to_string(),
                block_type: "hero".to_string(),
            }]
        );
        let hero = doc.find("hero-1").expect("hero-1 present");
        assert_eq!(hero.attribute("data-mounted"), Some("true"));
        assert_eq!(hero.inner_html(), Some("<h1>Welcome</h1>"));
        assert_eq!(*received.lock().expect("sink lock"), vec![json!({"title": "Welcome"})]);
    }

    #[test]
    fn repeated_passes_mount_at_most_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry.register("hero", counting_renderer(Arc::clone(&calls)));

        let mut table = DataTable::new();
        table.insert("hero-1", json!({}));

        let mut doc = Document::new();
        doc.append_to_body(container("hero", 1));

        let mut manager = MountManager::new(registry, Box::new(table));
        manager.run_pass(&mut doc).expect("manager active");
        let second = manager.run_pass(&mut doc).expect("manager active");
        let third = manager.run_pass(&mut doc).expect("manager active");

        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert!(second.is_quiet());
        assert!(third.is_quiet());
    }

    #[test]
    fn container_without_data_stays_unmounted() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry.register("navbar", counting_renderer(Arc::clone(&calls)));

        let mut doc = Document::new();
        doc.append_to_body(container("navbar", 2));

        let mut manager = MountManager::new(registry, Box::new(DataTable::new()));
        for _ in 0..3 {
            let report = manager.run_pass(&mut doc).expect("manager active");
            assert_eq!(report.missing_data, vec!["navbar-2".to_string()]);
        }

        assert_eq!(calls.load(Ordering::Relaxed), 0);
        let navbar = doc.find("navbar-2").expect("navbar-2 present");
        assert_eq!(navbar.attribute("data-mounted"), None);
    }

    #[test]
    fn renderer_failure_is_isolated_to_its_container() {
        let mut registry = Registry::new();
        registry.register("blog", |data: &JsonValue| {
            if data.get("fail").and_then(JsonValue::as_bool) == Some(true) {
                Err(RenderError::message("exploded during instantiation"))
            } else {
                Ok("<article>ok</article>".to_string())
            }
        });

        let mut table = DataTable::new();
        table.insert("blog-1", json!({"fail": true}));
        table.insert("blog-2", json!({}));

        let mut doc = Document::new();
        doc.append_to_body(container("blog", 1));
        doc.append_to_body(container("blog", 2));

        let mut manager = MountManager::new(registry, Box::new(table));
        let report = manager.run_pass(&mut doc).expect("manager active");

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].element_id, "blog-1");
        assert_eq!(report.mounted.len(), 1);
        assert_eq!(report.mounted[0].element_id, "blog-2");

        let failed = doc.find("blog-1").expect("blog-1 present");
        assert_eq!(failed.attribute("data-mounted"), None);
        let mounted = doc.find("blog-2").expect("blog-2 present");
        assert_eq!(mounted.attribute("data-mounted"), Some("true"));
    }

    #[test]
    fn service_coalesces_and_mounts_new_containers() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry.register("hero", counting_renderer(Arc::clone(&calls)));

        let table = SharedDataTable::new();
        table.insert("hero-1", json!({}));
        table.insert("hero-3", json!({}));

        let mut doc = Document::new();
        doc.append_to_body(container("hero", 1));

        let mut manager = MountManager::new(registry, Box::new(table));
        manager.service(&mut doc).expect("first service runs a pass");
        assert_eq!(calls.load(Ordering::Relaxed), 1);

        // Nothing changed since the pass recorded its own mutations.
        assert!(manager.service(&mut doc).is_none());

        doc.append_to_body(container("hero", 3));
        let report = manager.service(&mut doc).expect("mutation triggers a pass");
        assert_eq!(report.mounted.len(), 1);
        assert_eq!(report.mounted[0].element_id, "hero-3");
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn late_data_mounts_via_data_changed() {
        let mut registry = Registry::new();
        registry.register("hero", fixed_renderer("<h1>late</h1>"));

        let table = SharedDataTable::new();
        let mut doc = Document::new();
        doc.append_to_body(container("hero", 1));

        let mut manager = MountManager::new(registry, Box::new(table.clone()));
        let report = manager.run_pass(&mut doc).expect("manager active");
        assert_eq!(report.missing_data, vec!["hero-1".to_string()]);

        table.insert("hero-1", json!({"title": "late"}));
        let report = manager.data_changed(&mut doc).expect("manager active");
        assert_eq!(report.mounted.len(), 1);
        assert_eq!(
            doc.find("hero-1").and_then(|el| el.attribute("data-mounted")),
            Some("true")
        );
    }

    #[test]
    fn passes_never_mutate_the_data_table() {
        let mut registry = Registry::new();
        registry.register("hero", fixed_renderer(""));
        registry.register("blog", |_: &JsonValue| -> Result<String, RenderError> {
            Err(RenderError::message("always fails"))
        });

        let table = SharedDataTable::new();
        table.insert("hero-1", json!({"title": "Welcome"}));
        table.insert("blog-1", json!({"posts": [1, 2, 3]}));

        let before = table.snapshot();

        let mut doc = Document::new();
        doc.append_to_body(container("hero", 1));
        doc.append_to_body(container("blog", 1));

        let mut manager = MountManager::new(registry, Box::new(table.clone()));
        manager.run_pass(&mut doc).expect("manager active");
        manager.run_pass(&mut doc).expect("manager active");

        assert_eq!(table.snapshot(), before);
    }

    #[test]
    fn unknown_block_type_is_tolerated_and_never_marked() {
        let mut table = DataTable::new();
        table.insert("globe-1", json!({"spin": true}));

        let mut doc = Document::new();
        doc.append_to_body(container("globe", 1));

        let mut manager = MountManager::new(Registry::new(), Box::new(table));
        for _ in 0..2 {
            let report = manager.run_pass(&mut doc).expect("manager active");
            assert_eq!(report.unregistered, vec!["globe".to_string()]);
            assert!(report.is_quiet());
        }
        assert_eq!(
            doc.find("globe-1").and_then(|el| el.attribute("data-mounted")),
            None
        );
    }

    #[test]
    fn malformed_identity_is_skipped_defensively() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry.register("hero", counting_renderer(Arc::clone(&calls)));

        let mut table = DataTable::new();
        table.insert("navbar-9", json!({}));

        let mut doc = Document::new();
        // Container class says hero, but the id belongs to another type.
        doc.append_to_body(
            Element::new("div")
                .with_id("navbar-9")
                .with_class("hero-container"),
        );
        // No id at all.
        doc.append_to_body(Element::new("div").with_class("hero-container"));

        let mut manager = MountManager::new(registry, Box::new(table));
        let report = manager.run_pass(&mut doc).expect("manager active");

        assert!(report.is_quiet());
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert_eq!(
            doc.find("navbar-9").and_then(|el| el.attribute("data-mounted")),
            None
        );
    }

    #[test]
    fn teardown_stops_all_triggers() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry.register("hero", counting_renderer(Arc::clone(&calls)));

        let table = SharedDataTable::new();
        table.insert("hero-1", json!({}));

        let mut doc = Document::new();
        doc.append_to_body(container("hero", 1));

        let mut manager = MountManager::new(registry, Box::new(table.clone()));
        manager.teardown();
        assert!(!manager.is_active());

        assert!(manager.run_pass(&mut doc).is_none());
        assert!(manager.service(&mut doc).is_none());
        table.insert("hero-2", json!({}));
        doc.append_to_body(container("hero", 2));
        assert!(manager.data_changed(&mut doc).is_none());

        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert_eq!(
            doc.find("hero-1").and_then(|el| el.attribute("data-mounted")),
            None
        );
    }

    #[test]
    fn replaced_container_with_same_id_mounts_again() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry.register("hero", counting_renderer(Arc::clone(&calls)));

        let table = SharedDataTable::new();
        table.insert("hero-1", json!({}));

        let mut doc = Document::new();
        doc.append_to_body(container("hero", 1));

        let mut manager = MountManager::new(registry, Box::new(table));
        manager.run_pass(&mut doc).expect("manager active");
        assert_eq!(calls.load(Ordering::Relaxed), 1);

        // Content swap: a brand-new element with the same naming starts
        // over at unseen.
        doc.replace_body(vec![container("hero", 1)]);
        let report = manager.service(&mut doc).expect("swap triggers a pass");
        assert_eq!(report.mounted.len(), 1);
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }
}
