//! Small helpers shared by the on-disk record stores.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::PipelineError;

/// Write `value` as pretty JSON to `path` via a temp file in the same
/// directory and an atomic rename. Readers never see a partial record;
/// concurrent writers of one key resolve to the last complete write.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(tmp.as_file(), value)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read a JSON record. A missing file is `Ok(None)`; an unreadable or
/// unparsable one is `CacheCorruption`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PipelineError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(PipelineError::CacheCorruption {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| PipelineError::CacheCorruption {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
}
