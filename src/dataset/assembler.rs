use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::cache::ContentCache;
use crate::config::AssemblerConfig;
use crate::dataset::budgeting::{BudgetPacker, Packed};
use crate::dataset::dataset::Dataset;
use crate::dataset::fingerprint::fingerprint_candidates;
use crate::document::{clean_text, sort_by_priority, DocumentSet};
use crate::error::PipelineError;
use crate::extract::TextExtractor;
use crate::store;
use crate::types::identifiers::DatasetFingerprint;

/// Builds size-bounded datasets and reuses them per fingerprint.
pub struct DatasetAssembler<E> {
    cache: ContentCache<E>,
    config: AssemblerConfig,
}

impl<E: TextExtractor> DatasetAssembler<E> {
    pub fn new(cache: ContentCache<E>, config: AssemblerConfig) -> Result<Self, PipelineError> {
        fs::create_dir_all(&config.dataset_dir)?;
        Ok(Self { cache, config })
    }

    pub fn cache(&self) -> &ContentCache<E> {
        &self.cache
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn dataset_path(&self, fingerprint: &DatasetFingerprint) -> PathBuf {
        self.config
            .dataset_dir
            .join(format!("combined_dataset_{}.json", fingerprint.as_str()))
    }

    /// Persisted dataset for `fingerprint`, if one is present, readable and
    /// recorded under that same fingerprint.
    pub fn load(&self, fingerprint: &DatasetFingerprint) -> Option<Dataset> {
        let path = self.dataset_path(fingerprint);
        match store::read_json::<Dataset>(&path) {
            Ok(Some(dataset)) if dataset.fingerprint() != fingerprint => {
                warn!(
                    path = %path.display(),
                    expected = %fingerprint,
                    recorded = %dataset.fingerprint(),
                    "ignoring dataset record with mismatched fingerprint"
                );
                None
            }
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable dataset record");
                None
            }
        }
    }

    /// Build the dataset for `set`, or return the persisted one when the
    /// fingerprint and budget are unchanged and no rebuild is forced.
    pub fn build(
        &self,
        set: &DocumentSet,
        char_budget: usize,
        force_rebuild: bool,
    ) -> Result<Dataset, PipelineError> {
        let mut candidates = set.candidates(&self.config.extensions)?;
        if candidates.is_empty() {
            return Err(PipelineError::EmptyCorpus(set.describe()));
        }

        let fingerprint = fingerprint_candidates(&candidates);
        info!(fingerprint = %fingerprint, candidates = candidates.len(), "resolved document set");

        if !force_rebuild {
            if let Some(dataset) = self.load(&fingerprint) {
                if dataset.char_budget() == char_budget {
                    info!(
                        fingerprint = %fingerprint,
                        documents = dataset.metadata.total_documents,
                        chars = dataset.total_chars(),
                        "reusing persisted dataset"
                    );
                    return Ok(dataset);
                }
                debug!(
                    fingerprint = %fingerprint,
                    persisted_budget = dataset.char_budget(),
                    char_budget,
                    "persisted dataset built for another budget"
                );
            }
        }

        sort_by_priority(&mut candidates);

        let mut packer = BudgetPacker::new(char_budget, self.config.min_fragment_chars);
        for candidate in &candidates {
            if packer.is_exhausted() {
                info!(char_budget, "dataset budget exhausted");
                break;
            }

            let text = match self.cache.get_text(&candidate.path) {
                Ok(text) => text,
                Err(e) => {
                    warn!(source = %candidate.name, error = %e, "skipping document");
                    continue;
                }
            };

            let cleaned = clean_text(&text);
            if cleaned.is_empty() {
                warn!(source = %candidate.name, "document has no usable lines after cleaning");
                continue;
            }

            match packer.offer(&candidate.name, &cleaned) {
                Packed::Full => debug!(source = %candidate.name, "added document"),
                Packed::Truncated => info!(
                    source = %candidate.name,
                    remaining = packer.remaining(),
                    "truncated document to fit budget"
                ),
                Packed::Skipped => warn!(
                    source = %candidate.name,
                    remaining = packer.remaining(),
                    "remaining budget below minimum fragment, skipping document"
                ),
            }
        }

        let packed = packer.finish();
        if packed.documents.is_empty() {
            return Err(PipelineError::EmptyCorpus(format!(
                "{} (no document produced text)",
                set.describe()
            )));
        }

        let dataset = Dataset::from_documents(fingerprint, packed.documents, char_budget);
        let path = self.dataset_path(dataset.fingerprint());
        store::write_json_atomic(&path, &dataset)?;

        info!(
            fingerprint = %dataset.fingerprint(),
            documents = dataset.metadata.total_documents,
            chars = dataset.total_chars(),
            truncated = packed.documents_truncated,
            skipped = packed.documents_skipped,
            path = %path.display(),
            "built dataset"
        );

        Ok(dataset)
    }
}
