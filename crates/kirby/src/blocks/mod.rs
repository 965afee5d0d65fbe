//! Typed renderers for the site's block types.
//!
//! Each block module pairs a props struct with a `render` function that
//! validates the untyped table payload at the boundary and produces an
//! HTML fragment. Field names follow the keys the templates emit
//! (camelCase, with lowercase aliases for fields the CMS flattens).

use blockmount_core::RenderError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

/// Article author box.
pub mod authorbox;
/// Paginated article listing with category filters.
pub mod blog;
/// Featured article with a trailing list.
pub mod featuredblog;
/// Page footer with link columns and policies.
pub mod footer;
/// Hero banner.
pub mod hero;
/// Most recent articles strip.
pub mod latestblog;
/// Site navigation bar.
pub mod navbar;
/// Icon/subtitle/title/description text section.
pub mod textblock;

/// A processed image as the CMS emits it for file fields.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageRef {
    /// Public URL of the image.
    pub url: String,
    /// Alt text.
    pub alt: String,
    /// Responsive srcset, when the CMS generated one.
    pub srcset: Option<String>,
    /// Intrinsic width in pixels.
    pub width: Option<u32>,
    /// Intrinsic height in pixels.
    pub height: Option<u32>,
    /// Original file name.
    pub filename: Option<String>,
}

impl ImageRef {
    /// Whether the reference points at an actual file.
    pub fn is_present(&self) -> bool {
        !self.url.is_empty()
    }
}

/// One article as listed by the blog blocks.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    /// Article title.
    pub title: String,
    /// Teaser description.
    pub description: String,
    /// Category name.
    pub category: String,
    /// Human-readable publication date.
    pub date: String,
    /// Estimated reading time in minutes.
    #[serde(alias = "readtime")]
    pub read_time: u32,
    /// Article URL.
    pub url: String,
    /// Author display name.
    pub author: String,
    /// Author portrait, if any.
    #[serde(alias = "authorimage")]
    pub author_image: Option<ImageRef>,
    /// Lead image, if any.
    #[serde(alias = "featuredimage")]
    pub featured_image: Option<ImageRef>,
}

/// Deserializes a props struct from the payload value.
///
/// Extra fields (the merged site context) are ignored; missing fields take
/// the struct's defaults. A payload of the wrong overall shape is a
/// renderer error, which the mount pass contains at the container.
pub(crate) fn parse_props<T>(payload: &JsonValue) -> Result<T, RenderError>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(payload.clone())?)
}
