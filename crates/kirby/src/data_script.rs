//! Extraction and emission of the inline block data scripts.
//!
//! The page templates attach block data as inline scripts of the form
//!
//! ```text
//! window.blockData = window.blockData || {};
//! window.blockData['hero-1'] = {"title": "Welcome"};
//! ```
//!
//! [`extract_block_data`] recovers a [`DataTable`] from a full page by
//! collecting all `<script>` text and scanning it for those assignments;
//! [`emit_data_script`] produces the same form from a table, for templates
//! rendered outside the CMS.

use blockmount_core::DataTable;
use lol_html::{RewriteStrSettings, rewrite_str, text};
use serde_json::Value as JsonValue;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

const ASSIGNMENT_PREFIX: &str = "window.blockData[";

/// Errors from the data script pipeline.
///
/// Individual malformed assignments are skipped with a warning rather than
/// failing the page.
#[derive(Debug, Error)]
pub enum DataScriptError {
    /// The HTML rewriter failed on the document itself.
    #[error("html rewriting failed: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}

/// Collects every `window.blockData[...]` assignment from a page's scripts.
pub fn extract_block_data(html: &str) -> Result<DataTable, DataScriptError> {
    let scripts = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&scripts);

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![text!("script", move |chunk| {
                sink.borrow_mut().push_str(chunk.as_str());
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    )?;

    let scripts = scripts.borrow();
    Ok(parse_assignments(&scripts))
}

/// Scans script text for assignments and builds a table from them.
fn parse_assignments(source: &str) -> DataTable {
    let mut table = DataTable::new();
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find(ASSIGNMENT_PREFIX) {
        let start = cursor + found + ASSIGNMENT_PREFIX.len();
        cursor = start;
        match parse_one_assignment(&source[start..]) {
            Some((element_id, payload, consumed)) => {
                table.insert(element_id, payload);
                cursor = start + consumed;
            }
            None => {
                log::warn!("malformed inline block data assignment; skipping");
            }
        }
    }

    table
}

/// Parses `'id'] = {json}` (or the double-quoted form), returning the id,
/// the payload, and how many bytes were consumed.
fn parse_one_assignment(rest: &str) -> Option<(String, JsonValue, usize)> {
    let mut chars = rest.char_indices();
    let (_, quote) = chars.next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }

    let id_start = quote.len_utf8();
    let id_end = rest[id_start..].find(quote)? + id_start;
    let element_id = &rest[id_start..id_end];

    let after_quote = &rest[id_end + quote.len_utf8()..];
    let after_bracket = after_quote.trim_start().strip_prefix(']')?;
    let after_equals = after_bracket.trim_start().strip_prefix('=')?;
    let json_part = after_equals.trim_start();

    let mut stream = serde_json::Deserializer::from_str(json_part).into_iter::<JsonValue>();
    let payload = match stream.next() {
        Some(Ok(value)) => value,
        _ => return None,
    };
    let consumed = rest.len() - json_part.len() + stream.byte_offset();
    Some((element_id.to_string(), payload, consumed))
}

/// Serializes a table into the inline script the templates emit.
pub fn emit_data_script(table: &DataTable) -> String {
    let mut out = String::from("<script>\nwindow.blockData = window.blockData || {};\n");
    for (element_id, payload) in table.iter() {
        let id = serde_json::to_string(element_id).unwrap_or_default();
        let value = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
        out.push_str(&format!("window.blockData[{id}] = {value};\n"));
    }
    out.push_str("</script>");
    out
}
