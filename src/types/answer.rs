use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a question is run against a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// One call over the whole (possibly reduced) corpus.
    #[default]
    Combined,
    /// One call per document, then fan-in of the relevant answers.
    PerDocument,
}

impl FromStr for QueryMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "combined" => Ok(Self::Combined),
            "individual" | "per-document" | "per_document" => Ok(Self::PerDocument),
            other => Err(format!("unknown query mode '{other}'")),
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::Combined => f.write_str("combined"),
            QueryMode::PerDocument => f.write_str("per-document"),
        }
    }
}

/// Which path produced the final answer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerMethod {
    Combined,
    PerDocument,
    PerDocumentSynthesized,
}

/// Relevance-tagged answer for a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedAnswer {
    pub is_relevant: bool,
    pub text: String,
}

impl ScopedAnswer {
    /// Interpret free text: any case-insensitive occurrence of `sentinel`
    /// marks the document as not relevant.
    pub fn from_sentinel(text: impl Into<String>, sentinel: &str) -> Self {
        let text = text.into().trim().to_string();
        let is_relevant = !text.to_uppercase().contains(&sentinel.to_uppercase());
        Self { is_relevant, text }
    }
}

/// Per-document result of a fan-out query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub source_name: String,
    pub is_relevant: bool,
    /// Empty when the document is not relevant.
    pub answer_text: String,
}

impl QueryOutcome {
    pub fn relevant(source_name: impl Into<String>, answer_text: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            is_relevant: true,
            answer_text: answer_text.into(),
        }
    }

    pub fn not_relevant(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            is_relevant: false,
            answer_text: String::new(),
        }
    }
}

/// The answer returned to callers, whatever the query mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizedAnswer {
    pub question: String,
    pub answer: String,
    pub contributing_sources: Vec<String>,
    pub method: AnswerMethod,

    pub documents_analyzed: usize,

    /// Combined mode: whether the corpus went through keyword reduction.
    pub reduced: bool,
    /// Combined mode: characters of context actually sent.
    pub knowledge_chars: usize,

    /// Fan-out mode: one outcome per document, in dataset order.
    pub outcomes: Vec<QueryOutcome>,
    /// Fan-out mode: synthesis call failed and answers were concatenated.
    pub synthesis_fallback: bool,

    pub answered_at: DateTime<Utc>,
}

impl SynthesizedAnswer {
    pub fn relevant_documents_found(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_relevant).count()
    }
}
