use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::DocumentEntry;
use crate::types::identifiers::DatasetFingerprint;

const HEADER_RULE_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    pub fingerprint: DatasetFingerprint,
    pub total_documents: usize,
    pub total_chars: usize,
    pub processed_files: Vec<String>,
    pub created_at: DateTime<Utc>, // informational only
    pub max_chars_limit: usize,
}

/// A size-bounded combined corpus, persisted per fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub combined_text: String,
    pub documents: Vec<DocumentEntry>,
    pub metadata: DatasetMetadata,
}

impl Dataset {
    pub fn from_documents(
        fingerprint: DatasetFingerprint,
        documents: Vec<DocumentEntry>,
        char_budget: usize,
    ) -> Self {
        let total_chars = documents.iter().map(|d| d.char_count).sum();
        let processed_files = documents.iter().map(|d| d.source.clone()).collect();

        Self {
            combined_text: combine_documents(&documents),
            metadata: DatasetMetadata {
                fingerprint,
                total_documents: documents.len(),
                total_chars,
                processed_files,
                created_at: Utc::now(),
                max_chars_limit: char_budget,
            },
            documents,
        }
    }

    pub fn fingerprint(&self) -> &DatasetFingerprint {
        &self.metadata.fingerprint
    }

    pub fn total_chars(&self) -> usize {
        self.metadata.total_chars
    }

    pub fn char_budget(&self) -> usize {
        self.metadata.max_chars_limit
    }

    pub fn included_source_names(&self) -> &[String] {
        &self.metadata.processed_files
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.metadata.created_at
    }
}

/// Each document framed by a header naming its source.
pub fn combine_documents(documents: &[DocumentEntry]) -> String {
    let rule = "=".repeat(HEADER_RULE_LEN);
    documents
        .iter()
        .map(|doc| format!("\n{rule}\nDOCUMENT: {}\n{rule}\n{}", doc.source, doc.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.metadata;
        let average = if meta.total_documents == 0 {
            0
        } else {
            meta.total_chars / meta.total_documents
        };

        writeln!(f, "Dataset {}", meta.fingerprint)?;
        writeln!(f, "  documents:     {}", meta.total_documents)?;
        writeln!(f, "  total chars:   {} (limit {})", meta.total_chars, meta.max_chars_limit)?;
        writeln!(f, "  avg per doc:   {average}")?;
        writeln!(f, "  created:       {}", meta.created_at.to_rfc3339())?;
        write!(f, "  sources:       {}", meta.processed_files.join(", "))
    }
}
