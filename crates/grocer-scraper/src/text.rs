//! Text shaping for product detail attributes.
//!
//! The detail endpoint returns attribute values as HTML fragments keyed by
//! camel-case names. These helpers turn them into the plain-text block that
//! lands in the `details` column.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Attribute keys copied into the details block, in output order.
pub const DETAIL_KEYS: [&str; 6] = [
    "brand",
    "productType",
    "shortDescription",
    "description",
    "ingredients",
    "storageType",
];

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li\b[^>]*>").expect("valid list item regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)</?[a-zA-Z][^>]*>").expect("valid tag regex"));

/// Converts `<li>` markers to newlines, drops every other tag, and decodes
/// the handful of entities the catalog emits.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let with_breaks = LIST_ITEM_RE.replace_all(html, "\n");
    let text = TAG_RE.replace_all(&with_breaks, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        // Last, so `&amp;lt;` stays `&lt;`.
        .replace("&amp;", "&")
}

/// Splits a camel-case key into title-cased words.
///
/// `shortDescription` → `Short Description`; an upper-case run is one word,
/// so `HTMLTitle` → `Html Title`. Non-letters act as separators.
#[must_use]
pub fn humanize_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphabetic() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase() || (prev.is_ascii_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| title_case(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Builds the `details` column from the `detailed` section.
///
/// Only [`DETAIL_KEYS`] with string values are included, each rendered as
/// `"{Label}:\n\t{text}\n\n"` with continuation lines indented by a tab.
#[must_use]
pub fn format_details(detailed: &Map<String, Value>) -> String {
    let mut details = String::new();
    for key in DETAIL_KEYS {
        let Some(Value::String(raw)) = detailed.get(key) else {
            continue;
        };
        let text = strip_tags(raw).replace('\n', "\n\t");
        details.push_str(&humanize_key(key));
        details.push_str(":\n\t");
        details.push_str(&text);
        details.push_str("\n\n");
    }
    details
}

/// File extension of an image URL, taken from the last path segment with
/// any query string or fragment removed. Falls back to `jpg`.
#[must_use]
pub fn image_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => "jpg".to_owned(),
    }
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
