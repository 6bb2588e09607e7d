pub mod metadata;
pub mod document;
pub mod parser;

pub use metadata::{sort_by_priority, CandidateDocument};
pub use document::{clean_text, take_chars, DocumentEntry, TRUNCATION_MARKER};
pub use parser::DocumentSet;
