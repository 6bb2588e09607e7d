pub mod engine;
pub mod prompt;
pub mod reduction;
pub mod service;
pub mod synthesis;

pub use engine::RelevanceQueryEngine;
pub use reduction::{reduce_documents, KeywordLineFilter, LineFilter};
pub use service::AnsweringService;
pub use synthesis::{AnswerSynthesizer, Synthesis};
