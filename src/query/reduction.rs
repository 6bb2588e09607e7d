use crate::config::QueryConfig;
use crate::document::DocumentEntry;

pub trait LineFilter {
    fn keeps(&self, line: &str) -> bool;
}

/// Keeps lines that mention a domain keyword, or that are long enough to be
/// a substantive paragraph.
pub struct KeywordLineFilter {
    keywords: Vec<String>,
    min_line_chars: usize,
}

impl KeywordLineFilter {
    pub fn new(keywords: &[String], min_line_chars: usize) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            min_line_chars,
        }
    }
}

impl LineFilter for KeywordLineFilter {
    fn keeps(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        if self.keywords.iter().any(|k| lower.contains(k.as_str())) {
            return true;
        }
        line.chars().count() > self.min_line_chars && !line.chars().all(|c| c.is_ascii_digit())
    }
}

/// Condense each document to at most `max_lines_per_document` kept lines
/// and reassemble them under per-document headers.
pub fn reduce_documents(documents: &[DocumentEntry], config: &QueryConfig) -> String {
    let filter = KeywordLineFilter::new(&config.reduction_keywords, config.min_line_chars);
    reduce_with(documents, &filter, config.max_lines_per_document)
}

pub fn reduce_with<F: LineFilter>(documents: &[DocumentEntry], filter: &F, max_lines: usize) -> String {
    documents
        .iter()
        .map(|doc| {
            let kept = doc
                .body()
                .lines()
                .map(str::trim)
                .filter(|line| filter.keeps(line))
                .take(max_lines)
                .collect::<Vec<_>>()
                .join("\n");
            format!("\n=== DOCUMENT: {} ===\n{}", doc.source, kept)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
