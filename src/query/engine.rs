use chrono::Utc;
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, warn};

use crate::config::QueryConfig;
use crate::dataset::Dataset;
use crate::document::DocumentEntry;
use crate::error::PipelineError;
use crate::query::prompt;
use crate::query::reduction::reduce_documents;
use crate::query::service::AnsweringService;
use crate::query::synthesis::AnswerSynthesizer;
use crate::types::answer::{AnswerMethod, QueryMode, QueryOutcome, SynthesizedAnswer};

/// Runs questions against a dataset, either over the combined corpus or
/// one document at a time.
pub struct RelevanceQueryEngine<A> {
    service: A,
    config: QueryConfig,
    pool: ThreadPool,
}

impl<A: AnsweringService> RelevanceQueryEngine<A> {
    pub fn new(service: A, config: QueryConfig) -> Result<Self, PipelineError> {
        if config.fanout_workers == 0 {
            return Err(PipelineError::Config("query.fanout_workers must be > 0".into()));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.fanout_workers)
            .thread_name(|i| format!("fanout-{i}"))
            .build()?;

        Ok(Self {
            service,
            config,
            pool,
        })
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn answer(
        &self,
        question: &str,
        dataset: &Dataset,
        mode: QueryMode,
    ) -> Result<SynthesizedAnswer, PipelineError> {
        match mode {
            QueryMode::Combined => self.answer_combined(question, dataset),
            QueryMode::PerDocument => Ok(self.answer_per_document(question, dataset)),
        }
    }

    /// Single call over the whole corpus, reduced first if it is too long.
    /// A service failure is returned as an error.
    pub fn answer_combined(
        &self,
        question: &str,
        dataset: &Dataset,
    ) -> Result<SynthesizedAnswer, PipelineError> {
        let reduced = dataset.combined_text.chars().count() > self.config.reduction_threshold_chars;
        let knowledge = if reduced {
            reduce_documents(&dataset.documents, &self.config)
        } else {
            dataset.combined_text.clone()
        };

        let sources = dataset.included_source_names().to_vec();
        let request = prompt::combined_prompt(question, &knowledge, &sources, reduced);

        info!(
            documents = dataset.documents.len(),
            knowledge_chars = knowledge.chars().count(),
            reduced,
            "answering over combined corpus"
        );
        let answer = self.service.answer(&request)?;

        Ok(SynthesizedAnswer {
            question: question.to_string(),
            answer,
            contributing_sources: sources,
            method: AnswerMethod::Combined,
            documents_analyzed: dataset.documents.len(),
            reduced,
            knowledge_chars: knowledge.chars().count(),
            outcomes: Vec::new(),
            synthesis_fallback: false,
            answered_at: Utc::now(),
        })
    }

    /// Fan out one scoped call per document, then merge the relevant ones.
    /// Never fails: per-document errors count as not relevant, and no
    /// relevant documents yields the no-information text.
    pub fn answer_per_document(&self, question: &str, dataset: &Dataset) -> SynthesizedAnswer {
        let outcomes = self.query_documents(question, &dataset.documents);

        let relevant: Vec<QueryOutcome> = outcomes.iter().filter(|o| o.is_relevant).cloned().collect();
        let contributing_sources: Vec<String> =
            relevant.iter().map(|o| o.source_name.clone()).collect();

        info!(
            analyzed = outcomes.len(),
            relevant = relevant.len(),
            "per-document analysis finished"
        );

        let synthesis = AnswerSynthesizer::new(&self.service, &self.config.no_information_text)
            .synthesize(question, &relevant);

        let method = if relevant.len() > 1 {
            AnswerMethod::PerDocumentSynthesized
        } else {
            AnswerMethod::PerDocument
        };

        SynthesizedAnswer {
            question: question.to_string(),
            answer: synthesis.text,
            contributing_sources,
            method,
            documents_analyzed: outcomes.len(),
            reduced: false,
            knowledge_chars: 0,
            outcomes,
            synthesis_fallback: synthesis.fallback,
            answered_at: Utc::now(),
        }
    }

    /// One outcome per document, in the order given.
    pub fn query_documents(&self, question: &str, documents: &[DocumentEntry]) -> Vec<QueryOutcome> {
        self.pool.install(|| {
            documents
                .par_iter()
                .map(|doc| self.query_document(question, doc))
                .collect()
        })
    }

    fn query_document(&self, question: &str, document: &DocumentEntry) -> QueryOutcome {
        let sentinel = &self.config.not_relevant_sentinel;
        let request = prompt::document_prompt(question, document, sentinel);

        match self.service.answer_scoped(&request, sentinel) {
            Ok(scoped) if scoped.is_relevant && !scoped.text.trim().is_empty() => {
                debug!(source = %document.source, "document is relevant");
                QueryOutcome::relevant(&document.source, scoped.text)
            }
            Ok(_) => {
                debug!(source = %document.source, "document is not relevant");
                QueryOutcome::not_relevant(&document.source)
            }
            Err(e) => {
                warn!(source = %document.source, error = %e, "document query failed, treating as not relevant");
                QueryOutcome::not_relevant(&document.source)
            }
        }
    }
}
