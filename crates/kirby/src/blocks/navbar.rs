//! Site navigation bar block.

use crate::markup::{attr, external_link_attrs, style_variant, text};
use crate::site::SiteContext;
use blockmount_core::RenderError;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// One navigation link.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct NavLink {
    /// Link label.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Whether the link leaves the site.
    pub external: bool,
}

/// Navbar block content.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct NavbarProps {
    /// Logo text.
    pub logo: String,
    /// Explicit navigation links; when empty the listed site pages are used.
    pub links: Vec<NavLink>,
    /// Visual variant: `default`, `dark`, or `light`.
    pub style: String,
}

impl Default for NavbarProps {
    fn default() -> Self {
        Self {
            logo: "Your Site".to_string(),
            links: Vec::new(),
            style: "default".to_string(),
        }
    }
}

/// Renders the navbar block from its payload.
pub fn render(payload: &JsonValue) -> Result<String, RenderError> {
    let props: NavbarProps = super::parse_props(payload)?;
    let site = SiteContext::from_payload(payload);
    Ok(render_props(&props, &site))
}

fn render_props(props: &NavbarProps, site: &SiteContext) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<nav class=\"navbar navbar--{}\"><div class=\"navbar__inner\">",
        style_variant(&props.style)
    ));
    out.push_str(&format!(
        "<a class=\"navbar__logo\" href=\"/\">{}</a>",
        text(&props.logo)
    ));
    out.push_str("<ul class=\"navbar__links\">");
    if props.links.is_empty() {
        // Editors often leave the links field empty; fall back to the
        // listed site pages the templates ship with every payload.
        for page in &site.sitepages {
            out.push_str(&format!(
                "<li><a class=\"navbar__link{}\" href=\"{}\">{}</a></li>",
                if page.is_active { " navbar__link--active" } else { "" },
                attr(&page.url),
                text(&page.title)
            ));
        }
    } else {
        for link in &props.links {
            out.push_str(&format!(
                "<li><a class=\"navbar__link\" href=\"{}\"{}>{}</a></li>",
                attr(&link.url),
                external_link_attrs(link.external),
                text(&link.title)
            ));
        }
    }
    out.push_str("</ul></div></nav>");
    out
}
