#![deny(missing_docs)]
//! Blockmount core: block registry, data table contract, and the mount
//! manager that hydrates server-emitted containers exactly once each.

/// Container naming conventions and identity parsing.
pub mod container;
/// Block data table and the data source contract.
pub mod data;
/// Minimal mutable document model the manager operates on.
pub mod dom;
/// Core error types.
pub mod error;
/// The mount manager and its pass reports.
pub mod manager;
/// Block type registry.
pub mod registry;

pub use container::{
    CONTAINER_SUFFIX, ContainerIdentity, MOUNTED_MARKER, MOUNTED_VALUE, block_type_of_class,
    container_class,
};
pub use data::{DataSource, DataTable, SharedDataTable};
pub use dom::{Document, Element, NodeKey};
pub use error::{DataTableError, DomError, RenderError};
pub use manager::{MountFailure, MountManager, MountedBlock, PassReport};
pub use registry::{BlockRenderer, Registry};
