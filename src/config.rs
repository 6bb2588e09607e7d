use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

// Key point:
// Serializable
// Comparable
// Explicit defaults

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one extraction record per (name, digest).
    pub root: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("cache"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Directory holding one dataset record per fingerprint.
    pub dataset_dir: PathBuf,
    /// Global character budget across all included documents.
    pub char_budget: usize,
    /// A truncated tail shorter than this is skipped instead of appended.
    pub min_fragment_chars: usize,
    /// File extensions picked up when enumerating a directory.
    pub extensions: Vec<String>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("dataset_cache"),
            char_budget: 250_000,
            min_fragment_chars: 0,
            extensions: vec!["pdf".into(), "txt".into(), "md".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Combined text longer than this is reduced before prompting.
    pub reduction_threshold_chars: usize,
    pub reduction_keywords: Vec<String>,
    /// Lines at least this long survive reduction without a keyword.
    pub min_line_chars: usize,
    pub max_lines_per_document: usize,
    pub not_relevant_sentinel: String,
    pub no_information_text: String,
    pub fanout_workers: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            reduction_threshold_chars: 200_000,
            reduction_keywords: ["pasal", "ayat", "bab", "undang-undang", "konstitusi", "negara"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            min_line_chars: 50,
            max_lines_per_document: 50,
            not_relevant_sentinel: "NOT RELEVANT".into(),
            no_information_text: "No relevant information was found in any of the analyzed documents."
                .into(),
            fanout_workers: 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub cache: CacheConfig,
    pub assembler: AssemblerConfig,
    pub query: QueryConfig,
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig =
            toml::from_str(content).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.assembler.char_budget == 0 {
            return Err(PipelineError::Config("assembler.char_budget must be > 0".into()));
        }
        if self.query.fanout_workers == 0 {
            return Err(PipelineError::Config("query.fanout_workers must be > 0".into()));
        }
        if self.query.not_relevant_sentinel.trim().is_empty() {
            return Err(PipelineError::Config(
                "query.not_relevant_sentinel must not be empty".into(),
            ));
        }
        Ok(())
    }
}
