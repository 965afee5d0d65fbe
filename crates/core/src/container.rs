//! Container naming conventions shared by the page templates and the runtime.
//!
//! A mount point for block type `T` is an element with the class
//! `"{T}-container"` and an id of the form `"{T}-{instanceId}"`. Once a
//! renderer has been attached, the element carries the mounted marker
//! attribute so later passes skip it.

/// Attribute set on a container exactly once, when its renderer is attached.
pub const MOUNTED_MARKER: &str = "data-mounted";

/// Value written to [`MOUNTED_MARKER`] on mount.
pub const MOUNTED_VALUE: &str = "true";

/// Class-token suffix that designates an element as a block container.
pub const CONTAINER_SUFFIX: &str = "-container";

/// Returns the container class token for a block type, e.g. `hero-container`.
pub fn container_class(block_type: &str) -> String {
    format!("{block_type}{CONTAINER_SUFFIX}")
}

/// Extracts the block type from a container class token.
///
/// Returns `None` unless the token ends in `-container` with a non-empty
/// type prefix, so unrelated classes on the same element are ignored.
pub fn block_type_of_class(class_token: &str) -> Option<&str> {
    let block_type = class_token.strip_suffix(CONTAINER_SUFFIX)?;
    if block_type.is_empty() {
        return None;
    }
    Some(block_type)
}

/// Parsed identity of one container element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerIdentity {
    /// The element's full id, used as the data table key.
    pub element_id: String,
    /// Block type derived from the container class.
    pub block_type: String,
    /// Per-page instance id, the part of the element id after the type.
    pub instance_id: String,
}

impl ContainerIdentity {
    /// Parses an element id against the `"{blockType}-{instanceId}"` form.
    ///
    /// Returns `None` when the id does not belong to the given block type
    /// or carries no instance part; such containers are skipped defensively.
    pub fn parse(element_id: &str, block_type: &str) -> Option<Self> {
        let instance_id = element_id
            .strip_prefix(block_type)
            .and_then(|rest| rest.strip_prefix('-'))?;
        if instance_id.is_empty() {
            return None;
        }
        Some(Self {
            element_id: element_id.to_string(),
            block_type: block_type.to_string(),
            instance_id: instance_id.to_string(),
        })
    }
}
