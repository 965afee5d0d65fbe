//! Paginated article listing block with category chips.

use super::Article;
use crate::markup::{attr, text};
use crate::site::SiteContext;
use blockmount_core::RenderError;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Blog listing block content.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogProps {
    /// Section heading.
    pub title: String,
    /// Whether to render the category chip row.
    #[serde(alias = "showcategories")]
    pub show_categories: bool,
    /// Number of articles shown per page.
    #[serde(alias = "postsperpage")]
    pub posts_per_page: usize,
    /// Articles to list.
    pub articles: Vec<Article>,
}

impl Default for BlogProps {
    fn default() -> Self {
        Self {
            title: "Posts".to_string(),
            show_categories: true,
            posts_per_page: 8,
            articles: Vec::new(),
        }
    }
}

/// Renders the blog listing from its payload.
pub fn render(payload: &JsonValue) -> Result<String, RenderError> {
    let props: BlogProps = super::parse_props(payload)?;
    let site = SiteContext::from_payload(payload);
    Ok(render_props(&props, &site))
}

fn render_props(props: &BlogProps, site: &SiteContext) -> String {
    let min_read = site.translation("min_read", "min read");
    let by = site.translation("by", "by");

    let mut out = String::new();
    out.push_str("<section class=\"blog\">");
    out.push_str(&format!("<h2 class=\"blog__title\">{}</h2>", text(&props.title)));

    if props.show_categories {
        out.push_str("<ul class=\"blog__categories\">");
        for category in distinct_categories(&props.articles) {
            out.push_str(&format!(
                "<li class=\"blog__category\">{}</li>",
                text(category)
            ));
        }
        out.push_str("</ul>");
    }

    out.push_str("<div class=\"blog__grid\">");
    for article in props.articles.iter().take(props.posts_per_page) {
        out.push_str("<article class=\"blog__card\">");
        if !article.category.is_empty() {
            out.push_str(&format!(
                "<span class=\"blog__card-category\">{}</span>",
                text(&article.category)
            ));
        }
        out.push_str(&format!(
            "<h3 class=\"blog__card-title\"><a href=\"{}\">{}</a></h3>",
            attr(&article.url),
            text(&article.title)
        ));
        out.push_str(&format!(
            "<p class=\"blog__card-description\">{}</p>",
            text(&article.description)
        ));
        out.push_str(&format!(
            "<p class=\"blog__card-meta\">{} · {} {} · {} {}</p>",
            text(&article.date),
            article.read_time,
            text(min_read),
            text(by),
            text(&article.author)
        ));
        out.push_str("</article>");
    }
    out.push_str("</div></section>");
    out
}

/// Categories in first-seen order, without duplicates or blanks.
fn distinct_categories(articles: &[Article]) -> Vec<&str> {
    let mut seen = Vec::new();
    for article in articles {
        let category = article.category.as_str();
        if !category.is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}
