//! Small escaping and markup helpers shared by the block renderers.

use std::borrow::Cow;

/// Escapes a string for HTML text content.
pub(crate) fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// Escapes a string for a double-quoted HTML attribute value.
pub(crate) fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Attributes appended to anchors that leave the site.
pub(crate) fn external_link_attrs(external: bool) -> &'static str {
    if external {
        " target=\"_blank\" rel=\"noopener noreferrer\""
    } else {
        ""
    }
}

/// Resolves a style variant against the allowed set, falling back to
/// `default` for anything the templates did not anticipate.
pub(crate) fn style_variant(style: &str) -> &str {
    match style {
        "dark" | "light" => style,
        _ => "default",
    }
}
