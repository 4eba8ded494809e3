//! File decoding
//!
//! Turns an input file into a [`Document`]. Plain-text formats are read as-is
//! and HTML is reduced to its visible text. Formats that need an external
//! converter (PDF, Word) decode to a placeholder instead of failing.

use crate::errors::{Result, TunerError};
use crate::types::Document;
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Extensions read as UTF-8 text
const PLAIN_TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown", "csv", "json"];

/// Extensions reduced from HTML to text
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Elements whose text is never visible
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Placeholder content for files this crate cannot decode
pub fn unsupported_placeholder(name: &str) -> String {
    format!("[Unsupported file type: {}]", name)
}

/// Decode one file by extension (case-insensitive)
pub fn decode_file(path: &Path) -> Result<Document> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let content = if PLAIN_TEXT_EXTENSIONS.contains(&extension.as_str()) {
        read_text(path, &name)?
    } else if HTML_EXTENSIONS.contains(&extension.as_str()) {
        html_to_text(&read_text(path, &name)?)
    } else {
        warn!(file = %name, "unsupported file type, using placeholder");
        unsupported_placeholder(&name)
    };

    debug!(file = %name, chars = content.chars().count(), "decoded file");
    Ok(Document::new(name, content))
}

fn read_text(path: &Path, name: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| TunerError::Input {
        file: name.to_string(),
        reason: e.to_string(),
    })
}

/// Visible text of an HTML document, one line per text node
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .unwrap_or_else(|| document.root_element());

    visible_text(root)
}

fn visible_text(root: ElementRef<'_>) -> String {
    root.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            if hidden {
                return None;
            }
            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (!collapsed.is_empty()).then_some(collapsed)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
