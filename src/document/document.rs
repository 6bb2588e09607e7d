use serde::{Deserialize, Serialize};

/// Appended to a document's content when the budget cut it short.
pub const TRUNCATION_MARKER: &str = "\n[TRUNCATED]";

/// Lines this short or shorter (after trimming) are dropped by cleaning.
pub const MIN_LINE_LEN: usize = 3;

/// One document as it sits inside a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntry {
    pub source: String,
    pub content: String,
    /// Budgeted characters of source text. Excludes the truncation marker.
    pub char_count: usize,
    pub word_count: usize,
    #[serde(default)]
    pub truncated: bool,
}

impl DocumentEntry {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            source: source.into(),
            char_count: content.chars().count(),
            word_count: content.split_whitespace().count(),
            content,
            truncated: false,
        }
    }

    /// Keep the first `max_chars` characters and mark the entry truncated.
    pub fn truncated(source: impl Into<String>, content: &str, max_chars: usize) -> Self {
        let kept = take_chars(content, max_chars);
        let mut entry = Self::new(source, kept);
        entry.content.push_str(TRUNCATION_MARKER);
        entry.truncated = true;
        entry
    }

    /// Content without the truncation marker.
    pub fn body(&self) -> &str {
        if self.truncated {
            self.content
                .strip_suffix(TRUNCATION_MARKER)
                .unwrap_or(&self.content)
        } else {
            &self.content
        }
    }
}

/// Trim every line and drop blank or very short ones.
pub fn clean_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_LINE_LEN)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix of `text` holding at most `max_chars` characters, cut on a char
/// boundary.
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
