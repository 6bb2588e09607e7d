use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// A file that may go into a dataset, with the metadata that feeds the
/// dataset fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDocument {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    /// Whole seconds since the Unix epoch.
    pub modified: u64,
}

impl CandidateDocument {
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let meta = fs::metadata(path)?;
        let modified = meta
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            size: meta.len(),
            modified,
        })
    }

    /// `{name}_{size}_{modified}`
    pub fn signature(&self) -> String {
        format!("{}_{}_{}", self.name, self.size, self.modified)
    }
}

/// Largest first; ties broken by name so the order is stable.
pub fn sort_by_priority(candidates: &mut [CandidateDocument]) {
    candidates.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
}
