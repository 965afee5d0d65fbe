//! Featured article block: first article large, the rest as a list.

use super::Article;
use crate::markup::{attr, text};
use blockmount_core::RenderError;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Featured-articles block content.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturedBlogProps {
    /// Section heading.
    pub title: String,
    /// Articles; the first one is featured.
    pub articles: Vec<Article>,
}

impl Default for FeaturedBlogProps {
    fn default() -> Self {
        Self {
            title: "Latest articles".to_string(),
            articles: Vec::new(),
        }
    }
}

/// Renders the featured-articles block from its payload.
pub fn render(payload: &JsonValue) -> Result<String, RenderError> {
    let props: FeaturedBlogProps = super::parse_props(payload)?;
    Ok(render_props(&props))
}

fn render_props(props: &FeaturedBlogProps) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"featuredblog\">");
    out.push_str(&format!(
        "<h2 class=\"featuredblog__title\">{}</h2>",
        text(&props.title)
    ));

    let mut articles = props.articles.iter();
    if let Some(featured) = articles.next() {
        out.push_str("<article class=\"featuredblog__feature\">");
        if let Some(image) = featured.featured_image.as_ref().filter(|img| img.is_present()) {
            out.push_str(&format!(
                "<img class=\"featuredblog__image\" src=\"{}\" alt=\"{}\">",
                attr(&image.url),
                attr(&image.alt)
            ));
        }
        out.push_str(&format!(
            "<h3><a href=\"{}\">{}</a></h3>",
            attr(&featured.url),
            text(&featured.title)
        ));
        out.push_str(&format!(
            "<p class=\"featuredblog__description\">{}</p>",
            text(&featured.description)
        ));
        out.push_str("</article>");
    }

    out.push_str("<ul class=\"featuredblog__rest\">");
    for article in articles {
        out.push_str(&format!(
            "<li><a href=\"{}\">{}</a><span class=\"featuredblog__date\">{}</span></li>",
            attr(&article.url),
            text(&article.title),
            text(&article.date)
        ));
    }
    out.push_str("</ul></section>");
    out
}
