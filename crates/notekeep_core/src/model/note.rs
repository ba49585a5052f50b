//! Note records and rich-text helpers.
//!
//! # Responsibility
//! - Define the note record edited by the rich-text editor.
//! - Derive the plain-text projection from formatted editor output.
//!
//! # Invariants
//! - `updated_at >= created_at` for every stored note.
//! - `content` is the text the analysis service reads; `rich_content` is only
//!   rendered back into the editor.

use super::ItemId;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static BLOCK_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*(br|/p|/div|/li|/h[1-6]|/ul|/ol|/blockquote)\b[^>]*>")
        .expect("valid block tag regex")
});
static ANY_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static INLINE_WS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid inline ws regex"));
static LINE_BREAKS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\n\s*").expect("valid line break regex"));

/// User-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: ItemId,
    pub title: String,
    /// Plain-text body.
    pub content: String,
    /// Formatted (HTML) body produced by the rich editor.
    pub rich_content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation input for a note; timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub rich_content: String,
}

impl NewNote {
    /// Note with a plain-text body; the rich body starts empty.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            rich_content: String::new(),
        }
    }

    pub(crate) fn into_note(self, id: ItemId, now: DateTime<Utc>) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            rich_content: self.rich_content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update merged into an existing note.
///
/// `None` fields keep the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub rich_content: Option<String>,
}

impl NotePatch {
    /// Patch produced by saving the rich editor: stores the HTML and its
    /// derived plain text together.
    pub fn from_rich_content(html: impl Into<String>) -> Self {
        let html = html.into();
        Self {
            title: None,
            content: Some(derive_plain_text(&html)),
            rich_content: Some(html),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.rich_content.is_none()
    }

    pub(crate) fn apply_to(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(rich_content) = self.rich_content {
            note.rich_content = rich_content;
        }
    }
}

/// Derives the plain-text body from rich editor HTML.
///
/// Rules:
/// - block-closing tags and `<br>` become line breaks, other tags are dropped;
/// - common entities are decoded;
/// - runs of spaces collapse to one, blank lines collapse, result is trimmed.
pub fn derive_plain_text(html: &str) -> String {
    let with_breaks = BLOCK_TAG_RE.replace_all(html, "\n");
    let without_tags = ANY_TAG_RE.replace_all(&with_breaks, "");
    let decoded = decode_entities(&without_tags);
    let inline = INLINE_WS_RE.replace_all(&decoded, " ");
    let lines = LINE_BREAKS_RE.replace_all(&inline, "\n");
    lines.trim().to_string()
}

fn decode_entities(value: &str) -> String {
    // `&amp;` last so `&amp;lt;` stays literal `&lt;`.
    value
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::{derive_plain_text, NotePatch};

    #[test]
    fn plain_text_drops_tags_and_keeps_list_items_apart() {
        let html = "<h2>Nieuwe features</h2><ul><li>Voice notes</li><li>Export</li></ul>";
        assert_eq!(
            derive_plain_text(html),
            "Nieuwe features\nVoice notes\nExport"
        );
    }

    #[test]
    fn plain_text_keeps_inline_formatting_joined() {
        assert_eq!(derive_plain_text("<b>meet</b>ing at <i>10</i>"), "meeting at 10");
    }

    #[test]
    fn plain_text_decodes_entities_once() {
        assert_eq!(
            derive_plain_text("Tom&nbsp;&amp;&nbsp;Jerry &amp;lt;3"),
            "Tom & Jerry &lt;3"
        );
    }

    #[test]
    fn rich_patch_sets_both_bodies() {
        let patch = NotePatch::from_rich_content("<p>Hallo</p>");
        assert_eq!(patch.content.as_deref(), Some("Hallo"));
        assert_eq!(patch.rich_content.as_deref(), Some("<p>Hallo</p>"));
        assert!(patch.title.is_none());
        assert!(!patch.is_empty());
    }
}
