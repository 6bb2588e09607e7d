use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::document::metadata::CandidateDocument;
use crate::error::PipelineError;

/// The documents a dataset is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSet {
    /// Every top-level file in the directory with an accepted extension.
    Directory(PathBuf),
    /// An explicit list of files. No extension filtering.
    Files(Vec<PathBuf>),
}

impl DocumentSet {
    pub fn directory(root: impl Into<PathBuf>) -> Self {
        DocumentSet::Directory(root.into())
    }

    pub fn files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        DocumentSet::Files(paths.into_iter().map(Into::into).collect())
    }

    pub fn describe(&self) -> String {
        match self {
            DocumentSet::Directory(root) => root.display().to_string(),
            DocumentSet::Files(paths) => format!("{} listed files", paths.len()),
        }
    }

    /// Enumerate candidates in file-system order. Unreadable entries are
    /// skipped.
    pub fn candidates(&self, extensions: &[String]) -> Result<Vec<CandidateDocument>, PipelineError> {
        match self {
            DocumentSet::Directory(root) => {
                if !root.is_dir() {
                    warn!(root = %root.display(), "document directory not found");
                    return Ok(Vec::new());
                }

                let mut out = Vec::new();
                for entry in WalkDir::new(root)
                    .min_depth(1)
                    .max_depth(1)
                    .sort_by_file_name()
                {
                    let entry = match entry {
                        Ok(entry) => entry,
                        Err(e) => {
                            warn!(error = %e, "skipping unreadable directory entry");
                            continue;
                        }
                    };
                    if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
                        continue;
                    }
                    out.push(CandidateDocument::from_path(entry.path())?);
                }
                debug!(root = %root.display(), found = out.len(), "enumerated document directory");
                Ok(out)
            }
            DocumentSet::Files(paths) => {
                let mut out: Vec<CandidateDocument> = Vec::with_capacity(paths.len());
                for path in paths {
                    if out.iter().any(|c| &c.path == path) {
                        debug!(path = %path.display(), "skipping file listed twice");
                        continue;
                    }
                    match CandidateDocument::from_path(path) {
                        Ok(candidate) => out.push(candidate),
                        Err(e) => warn!(path = %path.display(), error = %e, "skipping missing document"),
                    }
                }
                disambiguate_names(&mut out);
                Ok(out)
            }
        }
    }
}

/// Files from different directories may share a name. Every candidate in
/// such a group is renamed to its full path so sources stay distinct,
/// whatever order the files were listed in.
fn disambiguate_names(candidates: &mut [CandidateDocument]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for candidate in candidates.iter() {
        *counts.entry(candidate.name.clone()).or_default() += 1;
    }
    for candidate in candidates.iter_mut() {
        if counts.get(&candidate.name).is_some_and(|&n| n > 1) {
            let full = candidate.path.display().to_string();
            warn!(name = %candidate.name, renamed = %full, "document name is not unique");
            candidate.name = full;
        }
    }
}

fn has_extension(path: &std::path::Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}
