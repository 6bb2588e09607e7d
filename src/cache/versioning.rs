use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::identifiers::ContentHash;

/// One extraction result, keyed by (file name, content digest).
///
/// Entries are immutable once written. When the source bytes change, the
/// digest changes and a new entry is written under a new key; the old one
/// is left alone until invalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub source_path: String,
    pub content_hash: ContentHash,
    pub extracted_text: String,
    #[serde(rename = "extractionDate")]
    pub extracted_at: DateTime<Utc>,
    #[serde(rename = "characterCount")]
    pub char_count: usize,
    pub word_count: usize,
    pub file_size: u64,
    pub file_name: String,
}

impl CacheEntry {
    pub fn new(source: &Path, content_hash: ContentHash, extracted_text: String, file_size: u64) -> Self {
        Self {
            source_path: source.to_string_lossy().into_owned(),
            content_hash,
            char_count: extracted_text.chars().count(),
            word_count: extracted_text.split_whitespace().count(),
            extracted_text,
            extracted_at: Utc::now(),
            file_size,
            file_name: file_name_of(source),
        }
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `{file_name}_{digest}.json`. The extension stays in the key so that
/// `report.txt` and `report.md` never share a record.
pub(crate) fn record_file_name(file_name: &str, hash: &ContentHash) -> String {
    format!("{}_{}.json", file_name, hash.as_str())
}

/// Inverse of [`record_file_name`]. Returns `None` for anything that is not
/// a cache record.
pub(crate) fn parse_record_file_name(name: &str) -> Option<(&str, ContentHash)> {
    let base = name.strip_suffix(".json")?;
    let (file_name, digest) = base.rsplit_once('_')?;
    Some((file_name, ContentHash::parse(digest)?))
}
