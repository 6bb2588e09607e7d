use std::fs;
use std::path::Path;

use tracing::info;

use crate::cache::cache::ContentCache;
use crate::cache::versioning;
use crate::error::PipelineError;
use crate::extract::TextExtractor;
use crate::types::identifiers::ContentHash;

impl<E: TextExtractor> ContentCache<E> {
    /// Whether a valid entry exists for the file's current bytes.
    pub fn is_current(&self, path: &Path) -> Result<bool, PipelineError> {
        let bytes = fs::read(path)?;
        let hash = ContentHash::from_content(&bytes);
        let record_path = self.record_path(path, &hash);
        let current = crate::store::read_json::<versioning::CacheEntry>(&record_path)
            .ok()
            .flatten()
            .is_some_and(|entry| entry.content_hash == hash);
        Ok(current)
    }

    /// Remove every entry recorded for this path's name, including entries
    /// superseded by later content. The file itself need not exist.
    pub fn invalidate(&self, path: &Path) -> Result<usize, PipelineError> {
        let file_name = versioning::file_name_of(path);
        let mut removed = 0;
        for (record_path, source_name) in self.record_files()? {
            if source_name == file_name {
                fs::remove_file(&record_path)?;
                removed += 1;
            }
        }
        info!(source = %path.display(), removed, "invalidated cache entries");
        Ok(removed)
    }

    pub fn clear_all(&self) -> Result<usize, PipelineError> {
        let files = self.record_files()?;
        for (record_path, _) in &files {
            fs::remove_file(record_path)?;
        }
        info!(removed = files.len(), "cleared extraction cache");
        Ok(files.len())
    }
}
