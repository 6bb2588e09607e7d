use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cache::versioning::{self, CacheEntry};
use crate::config::CacheConfig;
use crate::error::PipelineError;
use crate::extract::TextExtractor;
use crate::store;
use crate::types::identifiers::ContentHash;

/// Content-addressed store of extracted text.
///
/// Lookups hash the current bytes of the source file, so a stale entry is
/// never served even when file metadata is unchanged.
#[derive(Debug)]
pub struct ContentCache<E> {
    root: PathBuf,
    extractor: E,
}

impl<E: TextExtractor> ContentCache<E> {
    pub fn new(config: CacheConfig, extractor: E) -> Result<Self, PipelineError> {
        fs::create_dir_all(&config.root)?;
        Ok(Self {
            root: config.root,
            extractor,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Extracted text for the file at `path`, from cache when the digest
    /// matches, otherwise freshly extracted and recorded.
    pub fn get_text(&self, path: &Path) -> Result<String, PipelineError> {
        self.get_entry(path).map(|entry| entry.extracted_text)
    }

    pub fn get_entry(&self, path: &Path) -> Result<CacheEntry, PipelineError> {
        let bytes = fs::read(path)?;
        let hash = ContentHash::from_content(&bytes);
        let record_path = self.record_path(path, &hash);

        match self.load_record(&record_path, &hash) {
            Ok(Some(entry)) => {
                debug!(source = %path.display(), hash = %hash, "extraction cache hit");
                return Ok(entry);
            }
            Ok(None) => {
                debug!(source = %path.display(), hash = %hash, "extraction cache miss");
            }
            Err(e) => {
                warn!(source = %path.display(), error = %e, "ignoring unusable cache record");
            }
        }

        let source_name = versioning::file_name_of(path);
        let text = self
            .extractor
            .extract(&bytes)
            .map_err(|e| PipelineError::Extraction {
                source_name: source_name.clone(),
                detail: e.to_string(),
            })?;

        if text.trim().is_empty() {
            return Err(PipelineError::Extraction {
                source_name,
                detail: "extraction produced no text".into(),
            });
        }

        let entry = CacheEntry::new(path, hash, text, bytes.len() as u64);

        // Write failures are logged, not returned.
        match store::write_json_atomic(&record_path, &entry) {
            Ok(()) => info!(
                source = %path.display(),
                chars = entry.char_count,
                record = %record_path.display(),
                "cached extracted text"
            ),
            Err(e) => warn!(record = %record_path.display(), error = %e, "failed to write cache record"),
        }

        Ok(entry)
    }

    /// Every readable entry in the cache, ordered by record file name.
    /// Unreadable records are skipped.
    pub fn list_entries(&self) -> Result<Vec<CacheEntry>, PipelineError> {
        let mut entries = Vec::new();
        for (record_path, _) in self.record_files()? {
            match store::read_json::<CacheEntry>(&record_path) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "skipping unreadable cache record"),
            }
        }
        Ok(entries)
    }

    pub(crate) fn record_path(&self, source: &Path, hash: &ContentHash) -> PathBuf {
        self.root
            .join(versioning::record_file_name(&versioning::file_name_of(source), hash))
    }

    /// Cache record files as (path, source file name), sorted by record name.
    pub(crate) fn record_files(&self) -> Result<Vec<(PathBuf, String)>, PipelineError> {
        let mut files = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            let name = dir_entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some((source_name, _)) = versioning::parse_record_file_name(name) {
                files.push((dir_entry.path(), source_name.to_string()));
            }
        }
        files.sort();
        Ok(files)
    }

    fn load_record(
        &self,
        record_path: &Path,
        expected: &ContentHash,
    ) -> Result<Option<CacheEntry>, PipelineError> {
        let Some(entry) = store::read_json::<CacheEntry>(record_path)? else {
            return Ok(None);
        };

        if &entry.content_hash != expected {
            return Err(PipelineError::CacheCorruption {
                path: record_path.to_path_buf(),
                detail: format!(
                    "record hash {} does not match content hash {}",
                    entry.content_hash, expected
                ),
            });
        }
        Ok(Some(entry))
    }
}
