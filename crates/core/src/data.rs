//! Block data table: the page-lifetime mapping from element id to payload.
//!
//! The table is produced by the page (the CMS templates serialize one JSON
//! object per container) and is read-only from the runtime's perspective.
//! The mount manager treats every value as opaque; renderers validate shape
//! at their own boundary.

use crate::error::DataTableError;
use serde_json::Value as JsonValue;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Synchronously readable source of per-container block data.
///
/// Lookups return an owned clone so implementations backed by interior
/// mutability (see [`SharedDataTable`]) can satisfy the trait. Payloads are
/// small page content, not bulk data.
pub trait DataSource {
    /// Returns the payload for a container, if the page supplied one.
    fn block_data(&self, element_id: &str) -> Option<JsonValue>;
}

/// Owned element-id → payload mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    entries: BTreeMap<String, JsonValue>,
}

impl DataTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a serialized JSON object keyed by element id.
    pub fn from_json(json: &str) -> Result<Self, DataTableError> {
        let value: JsonValue = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Builds a table from an already-parsed JSON value.
    ///
    /// The root must be an object; anything else cannot be keyed by element
    /// id and is rejected.
    pub fn from_value(value: JsonValue) -> Result<Self, DataTableError> {
        match value {
            JsonValue::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            _ => Err(DataTableError::InvalidRootType),
        }
    }

    /// Inserts or replaces the payload for one container.
    pub fn insert(&mut self, element_id: impl Into<String>, data: JsonValue) {
        self.entries.insert(element_id.into(), data);
    }

    /// Returns the payload for a container by reference.
    pub fn get(&self, element_id: &str) -> Option<&JsonValue> {
        self.entries.get(element_id)
    }

    /// Iterates `(element_id, payload)` pairs in sorted id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.entries.iter().map(|(id, data)| (id.as_str(), data))
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DataSource for DataTable {
    fn block_data(&self, element_id: &str) -> Option<JsonValue> {
        self.entries.get(element_id).cloned()
    }
}

/// A data table that can gain entries after the mount manager is built.
///
/// Pages sometimes emit a container before its data arrives (deferred
/// scripts, content swaps). The host keeps one handle, hands a clone to the
/// manager, and triggers a retry pass once new entries land.
#[derive(Debug, Clone, Default)]
pub struct SharedDataTable {
    inner: Rc<RefCell<DataTable>>,
}

impl SharedDataTable {
    /// Creates an empty shared table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing table.
    pub fn from_table(table: DataTable) -> Self {
        Self {
            inner: Rc::new(RefCell::new(table)),
        }
    }

    /// Inserts or replaces the payload for one container.
    pub fn insert(&self, element_id: impl Into<String>, data: JsonValue) {
        self.inner.borrow_mut().insert(element_id, data);
    }

    /// Clones the current table contents.
    pub fn snapshot(&self) -> DataTable {
        self.inner.borrow().clone()
    }
}

impl DataSource for SharedDataTable {
    fn block_data(&self, element_id: &str) -> Option<JsonValue> {
        self.inner.borrow().get(element_id).cloned()
    }
}
