//! Hero banner block.

use crate::markup::{attr, external_link_attrs, style_variant, text};
use blockmount_core::RenderError;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Hero block content.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroProps {
    /// Main heading.
    pub title: String,
    /// Supporting line under the heading.
    pub subtitle: String,
    /// Call-to-action label; empty hides the button.
    #[serde(alias = "buttontext")]
    pub button_text: String,
    /// Call-to-action target.
    #[serde(alias = "buttonurl")]
    pub button_url: String,
    /// Whether the call-to-action leaves the site.
    #[serde(alias = "buttonexternal")]
    pub button_external: bool,
    /// Visual variant: `default`, `dark`, or `light`.
    pub style: String,
}

impl Default for HeroProps {
    fn default() -> Self {
        Self {
            title: "Your Hero Title".to_string(),
            subtitle: "Your hero subtitle".to_string(),
            button_text: String::new(),
            button_url: String::new(),
            button_external: false,
            style: "default".to_string(),
        }
    }
}

/// Renders the hero block from its payload.
pub fn render(payload: &JsonValue) -> Result<String, RenderError> {
    let props: HeroProps = super::parse_props(payload)?;
    Ok(render_props(&props))
}

fn render_props(props: &HeroProps) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<section class=\"hero hero--{}\"><div class=\"hero__inner\">",
        style_variant(&props.style)
    ));
    out.push_str(&format!("<h1 class=\"hero__title\">{}</h1>", text(&props.title)));
    out.push_str(&format!(
        "<p class=\"hero__subtitle\">{}</p>",
        text(&props.subtitle)
    ));
    if !props.button_text.is_empty() {
        out.push_str(&format!(
            "<a class=\"hero__button\" href=\"{}\"{}>{}</a>",
            attr(&props.button_url),
            external_link_attrs(props.button_external),
            text(&props.button_text)
        ));
    }
    out.push_str("</div></section>");
    out
}
