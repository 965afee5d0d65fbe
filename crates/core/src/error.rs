use thiserror::Error;

/// Errors surfaced by a block renderer while turning table data into HTML.
///
/// A renderer failure is always contained at the container boundary: the
/// mount pass records it, leaves the container unmounted, and continues
/// with the next container.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The table value did not match the shape the renderer expects.
    #[error("invalid block data: {0}")]
    InvalidData(#[from] serde_json::Error),
    /// Renderer-specific failure with a free-form message.
    #[error("{0}")]
    Message(String),
}

impl RenderError {
    /// Create a renderer failure from any displayable message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Errors emitted by mutating operations on the document model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    /// No element with the given id exists in the document.
    #[error("no element with id '{0}' in document")]
    NoSuchElement(String),
    /// The node key does not resolve to a live element.
    #[error("stale node key: element no longer in document")]
    StaleNodeKey,
}

/// Errors emitted while building a data table from serialized JSON.
#[derive(Debug, Error)]
pub enum DataTableError {
    /// The payload was not valid JSON.
    #[error("block data parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The payload parsed, but the root was not a JSON object.
    #[error("block data must be a JSON object keyed by element id")]
    InvalidRootType,
}
