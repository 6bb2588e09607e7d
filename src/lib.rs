//! Content-addressed extraction cache and multi-document question answering.
//!
//! `corpus-core` turns a set of source documents into a size-bounded,
//! fingerprinted dataset and answers questions against it, either over the
//! combined corpus or by querying each document and synthesizing the
//! relevant answers. Text extraction and the answering service are external
//! collaborators plugged in through [`extract::TextExtractor`] and
//! [`query::AnsweringService`].
//!
//! Identical document sets always produce the same fingerprint, and a
//! persisted dataset is reused byte-for-byte until its inputs change.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod document;
pub mod error;
pub mod extract;
pub mod query;
pub mod types;

mod store;

pub use cache::{CacheEntry, ContentCache};
pub use config::{AssemblerConfig, CacheConfig, PipelineConfig, QueryConfig};
pub use dataset::{Dataset, DatasetAssembler};
pub use document::{DocumentEntry, DocumentSet};
pub use error::{ErrorKind, PipelineError, ServiceError};
pub use extract::{PlainTextExtractor, TextExtractor};
pub use query::{AnswerSynthesizer, AnsweringService, RelevanceQueryEngine};
pub use types::{AnswerMethod, QueryMode, QueryOutcome, ScopedAnswer, SynthesizedAnswer};
