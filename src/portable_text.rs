//! Portable Text blocks and plain-text excerpts.
//!
//! Only the excerpt path lives here; formatted rendering of full bodies is
//! not supported.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One block of a rich-text body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block kind (`block` for text, other kinds for embeds).
    #[serde(rename = "_type", default)]
    pub kind: String,
    /// Paragraph style (`normal`, `h2`, ...).
    #[serde(default)]
    pub style: Option<String>,
    /// Inline spans; absent on non-text blocks.
    #[serde(default)]
    pub children: Option<Vec<Span>>,
}

/// An inline run of text within a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Span text.
    #[serde(default)]
    pub text: Option<String>,
    /// Decorator and annotation keys.
    #[serde(default)]
    pub marks: Vec<String>,
}

impl Block {
    /// A plain paragraph made of the given spans.
    pub fn paragraph<I, S>(spans: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: "block".to_string(),
            style: Some("normal".to_string()),
            children: Some(
                spans
                    .into_iter()
                    .map(|text| Span { text: Some(text.into()), marks: Vec::new() })
                    .collect(),
            ),
        }
    }
}

/// Concatenate the span text of the first block, without separators.
pub fn extract_excerpt(body: &[Block]) -> String {
    body.first()
        .and_then(|block| block.children.as_deref())
        .map(|spans| spans.iter().filter_map(|s| s.text.as_deref()).collect())
        .unwrap_or_default()
}

/// [`extract_excerpt`] over untyped JSON, tolerating any shape.
pub fn extract_excerpt_value(body: &Value) -> String {
    let Some(spans) = body
        .as_array()
        .and_then(|blocks| blocks.first())
        .and_then(|block| block.get("children"))
        .and_then(Value::as_array)
    else {
        return String::new();
    };

    spans
        .iter()
        .filter_map(|span| span.get("text").and_then(Value::as_str))
        .collect()
}
