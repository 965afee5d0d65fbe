//! Article author box block.

use super::ImageRef;
use crate::markup::{attr, text};
use blockmount_core::RenderError;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// An article author.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    /// Display name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Organization.
    pub affiliation: String,
    /// Short biography.
    pub bio: String,
    /// Portrait image.
    pub avatar: Option<ImageRef>,
    /// Personal website URL.
    pub website: String,
    /// Twitter handle or URL.
    pub twitter: String,
    /// LinkedIn URL.
    pub linkedin: String,
    /// Facebook URL.
    pub facebook: String,
}

/// Author box block content. Field names are lowercase as the CMS emits them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthorBoxProps {
    /// The author to present; absent renders nothing.
    pub author: Option<Author>,
    /// Whether to show the biography.
    pub showbio: bool,
    /// Whether to show social links.
    pub showsocial: bool,
    /// Optional heading above the box.
    pub customtitle: String,
}

impl Default for AuthorBoxProps {
    fn default() -> Self {
        Self {
            author: None,
            showbio: true,
            showsocial: true,
            customtitle: String::new(),
        }
    }
}

/// Renders the author box from its payload.
///
/// An absent author yields an empty fragment; the container still counts
/// as mounted, matching a component that renders nothing.
pub fn render(payload: &JsonValue) -> Result<String, RenderError> {
    let props: AuthorBoxProps = super::parse_props(payload)?;
    Ok(render_props(&props))
}

fn render_props(props: &AuthorBoxProps) -> String {
    let Some(author) = &props.author else {
        return String::new();
    };

    let mut out = String::new();
    if !props.customtitle.is_empty() {
        out.push_str(&format!(
            "<h3 class=\"authorbox__heading\">{}</h3>",
            text(&props.customtitle)
        ));
    }
    out.push_str("<div class=\"authorbox\">");
    if let Some(avatar) = author.avatar.as_ref().filter(|img| img.is_present()) {
        out.push_str(&format!(
            "<img class=\"authorbox__avatar\" src=\"{}\" alt=\"{}\">",
            attr(&avatar.url),
            attr(&avatar.alt)
        ));
    }
    out.push_str(&format!(
        "<p class=\"authorbox__name\">{}</p>",
        text(&author.name)
    ));
    let role = [author.position.as_str(), author.affiliation.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if !role.is_empty() {
        out.push_str(&format!("<p class=\"authorbox__role\">{}</p>", text(&role)));
    }
    if props.showbio && !author.bio.is_empty() {
        out.push_str(&format!("<p class=\"authorbox__bio\">{}</p>", text(&author.bio)));
    }
    if props.showsocial {
        let socials = [
            ("website", author.website.as_str()),
            ("twitter", author.twitter.as_str()),
            ("linkedin", author.linkedin.as_str()),
            ("facebook", author.facebook.as_str()),
        ];
        let present: Vec<_> = socials.iter().filter(|(_, url)| !url.is_empty()).collect();
        if !present.is_empty() {
            out.push_str("<ul class=\"authorbox__socials\">");
            for (kind, url) in present {
                out.push_str(&format!(
                    "<li><a class=\"authorbox__social authorbox__social--{kind}\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{kind}</a></li>",
                    attr(url)
                ));
            }
            out.push_str("</ul>");
        }
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_author_renders_nothing() {
        let html = render(&json!({})).expect("authorbox should render");
        assert!(html.is_empty());
    }

    #[test]
    fn renders_author_details_and_socials() {
        let html = render(&json!({
            "customtitle": "About the author",
            "author": {
                "name": "Jane Roe",
                "position": "Editor",
                "affiliation": "Blogsite",
                "bio": "Writes about compilers.",
                "avatar": {"url": "/img/jane.jpg", "alt": "Jane"},
                "website": "https://jane.example",
                "twitter": "https://twitter.com/jane"
            }
        }))
        .expect("authorbox should render");

        assert!(html.contains("About the author"));
        assert!(html.contains("Jane Roe"));
        assert!(html.contains("Editor, Blogsite"));
        assert!(html.contains("Writes about compilers."));
        assert!(html.contains("authorbox__social--website"));
        assert!(html.contains("authorbox__social--twitter"));
        assert!(!html.contains("authorbox__social--linkedin"));
    }

    #[test]
    fn bio_and_socials_can_be_hidden() {
        let html = render(&json!({
            "showbio": false,
            "showsocial": false,
            "author": {
                "name": "Jane Roe",
                "bio": "Hidden.",
                "website": "https://jane.example"
            }
        }))
        .expect("authorbox should render");

        assert!(!html.contains("Hidden."));
        assert!(!html.contains("authorbox__socials"));
    }
}
