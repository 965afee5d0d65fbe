//! Text section block with optional icon and lead paragraph.

use super::ImageRef;
use crate::markup::{attr, text};
use blockmount_core::RenderError;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Text block content.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBlockProps {
    /// Decorative icon image.
    pub icon: Option<ImageRef>,
    /// Kicker line above the title.
    pub subtitle: String,
    /// Section title.
    pub title: String,
    /// Body text; blank lines separate paragraphs.
    pub description: String,
}

/// Renders the text block from its payload.
pub fn render(payload: &JsonValue) -> Result<String, RenderError> {
    let props: TextBlockProps = super::parse_props(payload)?;
    Ok(render_props(&props))
}

fn render_props(props: &TextBlockProps) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"textblock\">");
    if let Some(icon) = props.icon.as_ref().filter(|img| img.is_present()) {
        out.push_str(&format!(
            "<img class=\"textblock__icon\" src=\"{}\" alt=\"{}\">",
            attr(&icon.url),
            attr(&icon.alt)
        ));
    }
    if !props.subtitle.is_empty() {
        out.push_str(&format!(
            "<p class=\"textblock__subtitle\">{}</p>",
            text(&props.subtitle)
        ));
    }
    if !props.title.is_empty() {
        out.push_str(&format!(
            "<h2 class=\"textblock__title\">{}</h2>",
            text(&props.title)
        ));
    }
    for (index, paragraph) in paragraphs(&props.description).iter().enumerate() {
        let class = if index == 0 {
            "textblock__lead"
        } else {
            "textblock__paragraph"
        };
        out.push_str(&format!("<p class=\"{class}\">{}</p>", text(paragraph)));
    }
    out.push_str("</section>");
    out
}

/// Splits the description on blank lines, dropping empty fragments.
fn paragraphs(description: &str) -> Vec<&str> {
    description
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
