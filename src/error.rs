use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by an external collaborator (text extraction or the
/// answering service).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No text available for {source_name}: {detail}")]
    Extraction { source_name: String, detail: String },

    #[error("No candidate documents found in {0}")]
    EmptyCorpus(String),

    #[error("Corrupt cache record {path}: {detail}")]
    CacheCorruption { path: PathBuf, detail: String },

    #[error("Answering service failed: {0}")]
    AnsweringService(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Coarse classification of a [`PipelineError`], so callers can match on
/// the kind and render the `Display` text as detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Extraction,
    EmptyCorpus,
    CacheCorruption,
    AnsweringService,
    Io,
    Serialization,
    Config,
    WorkerPool,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Extraction { .. } => ErrorKind::Extraction,
            PipelineError::EmptyCorpus(_) => ErrorKind::EmptyCorpus,
            PipelineError::CacheCorruption { .. } => ErrorKind::CacheCorruption,
            PipelineError::AnsweringService(_) => ErrorKind::AnsweringService,
            PipelineError::Io(_) => ErrorKind::Io,
            PipelineError::Serialization(_) => ErrorKind::Serialization,
            PipelineError::Config(_) => ErrorKind::Config,
            PipelineError::WorkerPool(_) => ErrorKind::WorkerPool,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Extraction => "extraction",
            ErrorKind::EmptyCorpus => "empty_corpus",
            ErrorKind::CacheCorruption => "cache_corruption",
            ErrorKind::AnsweringService => "answering_service",
            ErrorKind::Io => "io",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Config => "config",
            ErrorKind::WorkerPool => "worker_pool",
        };
        f.write_str(label)
    }
}
