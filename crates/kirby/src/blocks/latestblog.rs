//! Most recent articles strip with an optional "view all" button.

use super::{Article, ImageRef};
use crate::markup::{attr, text};
use blockmount_core::RenderError;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Latest-articles block content.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct LatestBlogProps {
    /// Section heading.
    pub title: String,
    /// "View all" label; empty hides the button.
    #[serde(alias = "buttontext")]
    pub button_text: String,
    /// "View all" target.
    #[serde(alias = "buttonurl")]
    pub button_url: String,
    /// Articles, newest first.
    pub articles: Vec<Article>,
}

impl Default for LatestBlogProps {
    fn default() -> Self {
        Self {
            title: "Latest articles".to_string(),
            button_text: String::new(),
            button_url: String::new(),
            articles: Vec::new(),
        }
    }
}

/// Renders the latest-articles block from its payload.
pub fn render(payload: &JsonValue) -> Result<String, RenderError> {
    let props: LatestBlogProps = super::parse_props(payload)?;
    Ok(render_props(&props))
}

fn render_props(props: &LatestBlogProps) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"latestblog\"><header class=\"latestblog__header\">");
    out.push_str(&format!(
        "<h2 class=\"latestblog__title\">{}</h2>",
        text(&props.title)
    ));
    if !props.button_text.is_empty() {
        out.push_str(&format!(
            "<a class=\"latestblog__more\" href=\"{}\">{}</a>",
            attr(&props.button_url),
            text(&props.button_text)
        ));
    }
    out.push_str("</header><ul class=\"latestblog__list\">");
    for article in &props.articles {
        out.push_str("<li class=\"latestblog__item\">");
        if let Some(image) = present(&article.featured_image) {
            out.push_str(&image_tag(image, "latestblog__image"));
        }
        out.push_str(&format!(
            "<a class=\"latestblog__link\" href=\"{}\">{}</a>",
            attr(&article.url),
            text(&article.title)
        ));
        out.push_str(&format!(
            "<p class=\"latestblog__description\">{}</p>",
            text(&article.description)
        ));
        out.push_str("<div class=\"latestblog__byline\">");
        if let Some(portrait) = present(&article.author_image) {
            out.push_str(&image_tag(portrait, "latestblog__avatar"));
        }
        if !article.author.is_empty() {
            out.push_str(&format!(
                "<span class=\"latestblog__author\">{}</span>",
                text(&article.author)
            ));
        }
        out.push_str(&format!(
            "<time class=\"latestblog__date\">{}</time>",
            text(&article.date)
        ));
        out.push_str("</div></li>");
    }
    out.push_str("</ul></section>");
    out
}

fn present(image: &Option<ImageRef>) -> Option<&ImageRef> {
    image.as_ref().filter(|img| img.is_present())
}

fn image_tag(image: &ImageRef, class: &str) -> String {
    let mut tag = format!(
        "<img class=\"{class}\" src=\"{}\" alt=\"{}\"",
        attr(&image.url),
        attr(&image.alt)
    );
    if let Some(srcset) = image.srcset.as_deref().filter(|s| !s.is_empty()) {
        tag.push_str(&format!(" srcset=\"{}\"", attr(srcset)));
    }
    if let (Some(width), Some(height)) = (image.width, image.height) {
        tag.push_str(&format!(" width=\"{width}\" height=\"{height}\""));
    }
    tag.push('>');
    tag
}
