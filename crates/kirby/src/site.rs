//! Site-wide context the templates merge into every block payload.
//!
//! Alongside its own fields, each block receives the listed site pages,
//! the current page, site metadata, and the translation strings for the
//! active language. Renderers that need any of it deserialize this shape
//! from the same payload value; everything is defaulted so a block payload
//! without site data still renders.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// One listed page, as used for navigation.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SitePage {
    /// Page title.
    pub title: String,
    /// Absolute or site-relative URL.
    pub url: String,
    /// URL slug.
    pub slug: String,
    /// Whether this page is the one being viewed.
    pub is_active: bool,
}

/// One language the site is available in.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageInfo {
    /// Language code, e.g. `en`.
    pub code: String,
    /// Human-readable language name.
    pub name: String,
    /// URL of the site in this language.
    pub url: String,
    /// Whether this is the default language.
    pub is_default: bool,
}

/// Site metadata.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteInfo {
    /// Site title.
    pub title: String,
    /// Site root URL.
    pub url: String,
    /// Active language code.
    pub language: String,
    /// Languages the site is available in (empty on single-language sites).
    pub languages: Vec<LanguageInfo>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            language: "en".to_string(),
            languages: Vec::new(),
        }
    }
}

/// The full site context carried inside a block payload.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteContext {
    /// Listed pages for navigation.
    pub sitepages: Vec<SitePage>,
    /// The page currently being rendered.
    pub current_page: SitePage,
    /// Site metadata.
    pub site: SiteInfo,
    /// Translated UI strings for the active language.
    pub translations: BTreeMap<String, String>,
}

impl SiteContext {
    /// Extracts the site context from a block payload.
    ///
    /// Unknown fields (the block's own content) are ignored; a payload that
    /// is not an object yields the default context rather than an error,
    /// since site data is an optional extra from the renderer's view.
    pub fn from_payload(payload: &JsonValue) -> Self {
        serde_json::from_value(payload.clone()).unwrap_or_default()
    }

    /// Looks up a translated string, falling back to the given default.
    pub fn translation<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.translations.get(key).map(String::as_str).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_payload_reads_site_fields_and_ignores_block_fields() {
        let payload = json!({
            "title": "Hero title",
            "sitepages": [
                {"title": "Blog", "url": "/blog", "slug": "blog", "isActive": true}
            ],
            "currentPage": {"title": "Blog", "url": "/blog", "slug": "blog", "isActive": true},
            "site": {"title": "My Site", "url": "https://example.com", "language": "de", "languages": []},
            "translations": {"read_more": "Weiterlesen"}
        });

        let ctx = SiteContext::from_payload(&payload);
        assert_eq!(ctx.sitepages.len(), 1);
        assert_eq!(ctx.sitepages[0].slug, "blog");
        assert!(ctx.sitepages[0].is_active);
        assert_eq!(ctx.site.language, "de");
        assert_eq!(ctx.translation("read_more", "Read more"), "Weiterlesen");
    }

    #[test]
    fn translation_falls_back_when_missing() {
        let ctx = SiteContext::default();
        assert_eq!(ctx.translation("min_read", "min read"), "min read");
    }

    #[test]
    fn non_object_payload_yields_default_context() {
        let ctx = SiteContext::from_payload(&json!("not an object"));
        assert_eq!(ctx, SiteContext::default());
    }
}
