//! Page footer block with link columns and policy links.

use super::ImageRef;
use crate::markup::{attr, external_link_attrs, text};
use blockmount_core::RenderError;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// One footer link.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterLink {
    /// Link label.
    pub text: String,
    /// Link target.
    pub url: String,
    /// Whether the link leaves the site.
    pub external: bool,
}

/// One column of footer links.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterColumn {
    /// Column heading.
    pub title: String,
    /// Links in the column.
    pub links: Vec<FooterLink>,
}

/// Logo field as the CMS emits it: one image, or an array when the editor
/// uploaded several (only the first is shown).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LogoField {
    /// A single image.
    One(ImageRef),
    /// Several images; the first is used.
    Many(Vec<ImageRef>),
}

impl LogoField {
    fn first(&self) -> Option<&ImageRef> {
        match self {
            Self::One(image) => Some(image),
            Self::Many(images) => images.first(),
        }
    }
}

/// Footer block content.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterProps {
    /// Site name next to the logo.
    pub name: String,
    /// Logo image.
    pub logo: Option<LogoField>,
    /// Link columns.
    pub columns: Vec<FooterColumn>,
    /// Copyright line.
    pub copyright: String,
    /// Policy links (imprint, privacy, terms).
    pub policies: Vec<FooterLink>,
    /// Whether to render the color-scheme toggle slot.
    #[serde(alias = "showmodetoggle")]
    pub show_mode_toggle: bool,
}

impl Default for FooterProps {
    fn default() -> Self {
        Self {
            name: String::new(),
            logo: None,
            columns: Vec::new(),
            copyright: String::new(),
            policies: Vec::new(),
            show_mode_toggle: true,
        }
    }
}

/// Renders the footer block from its payload.
pub fn render(payload: &JsonValue) -> Result<String, RenderError> {
    let props: FooterProps = super::parse_props(payload)?;
    Ok(render_props(&props))
}

fn render_props(props: &FooterProps) -> String {
    let mut out = String::new();
    out.push_str("<footer class=\"footer\"><div class=\"footer__brand\">");
    let logo = props.logo.as_ref().and_then(LogoField::first);
    if let Some(logo) = logo.filter(|img| img.is_present()) {
        out.push_str(&format!(
            "<img class=\"footer__logo\" src=\"{}\" alt=\"{}\">",
            attr(&logo.url),
            attr(&logo.alt)
        ));
    }
    if !props.name.is_empty() {
        out.push_str(&format!("<span class=\"footer__name\">{}</span>", text(&props.name)));
    }
    out.push_str("</div>");

    if !props.columns.is_empty() {
        out.push_str("<div class=\"footer__columns\">");
        for column in &props.columns {
            out.push_str("<nav class=\"footer__column\">");
            out.push_str(&format!(
                "<h4 class=\"footer__column-title\">{}</h4><ul>",
                text(&column.title)
            ));
            for link in &column.links {
                out.push_str(&format!(
                    "<li><a href=\"{}\"{}>{}</a></li>",
                    attr(&link.url),
                    external_link_attrs(link.external),
                    text(&link.text)
                ));
            }
            out.push_str("</ul></nav>");
        }
        out.push_str("</div>");
    }

    out.push_str("<div class=\"footer__meta\">");
    if !props.copyright.is_empty() {
        out.push_str(&format!(
            "<span class=\"footer__copyright\">{}</span>",
            text(&props.copyright)
        ));
    }
    if !props.policies.is_empty() {
        out.push_str("<ul class=\"footer__policies\">");
        for policy in &props.policies {
            out.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>",
                attr(&policy.url),
                text(&policy.text)
            ));
        }
        out.push_str("</ul>");
    }
    if props.show_mode_toggle {
        out.push_str("<span class=\"footer__mode-toggle\" data-mode-toggle></span>");
    }
    out.push_str("</div></footer>");
    out
}
