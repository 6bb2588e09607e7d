use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use corpus_core::config::QueryConfig;
use corpus_core::dataset::Dataset;
use corpus_core::document::DocumentEntry;
use corpus_core::error::{ErrorKind, ServiceError};
use corpus_core::query::{AnswerSynthesizer, AnsweringService, RelevanceQueryEngine};
use corpus_core::types::{
    AnswerMethod, DatasetFingerprint, QueryMode, QueryOutcome, ScopedAnswer,
};

const SYNTHESIS_MARKER: &str = "INTEGRATED ANSWER:";

fn dataset(docs: &[(&str, &str)]) -> Dataset {
    let documents = docs
        .iter()
        .map(|(source, content)| DocumentEntry::new(*source, *content))
        .collect();
    Dataset::from_documents(DatasetFingerprint::from_signatures(["fixture"]), documents, 100_000)
}

fn three_docs() -> Dataset {
    dataset(&[
        ("DocA", "Alpha chapter about fisheries and harbours."),
        ("DocB", "Beta chapter stating the quorum is forty two members."),
        ("DocC", "Gamma chapter about road maintenance."),
    ])
}

fn engine<A: AnsweringService>(service: A) -> RelevanceQueryEngine<A> {
    RelevanceQueryEngine::new(service, QueryConfig::default()).unwrap()
}

#[test]
fn fan_out_with_single_relevant_document_returns_its_answer_verbatim() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let service = move |prompt: &str| -> Result<String, ServiceError> {
        counter.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("quorum is forty two") {
            Ok("According to DocB, the quorum is 42 members.".into())
        } else {
            Ok("NOT RELEVANT".into())
        }
    };

    let answer = engine(service).answer(
        "What is the quorum?",
        &three_docs(),
        QueryMode::PerDocument,
    );
    let answer = answer.unwrap();

    assert_eq!(answer.relevant_documents_found(), 1);
    assert_eq!(answer.documents_analyzed, 3);
    assert_eq!(answer.answer, "According to DocB, the quorum is 42 members.");
    assert_eq!(answer.contributing_sources, vec!["DocB".to_string()]);
    assert_eq!(answer.method, AnswerMethod::PerDocument);
    assert!(!answer.synthesis_fallback);
    // No synthesis call for a single relevant source.
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn sentinel_is_matched_case_insensitively() {
    let service = |prompt: &str| -> Result<String, ServiceError> {
        if prompt.contains("DOCUMENT: DocA") {
            Ok("Not relevant.".into())
        } else if prompt.contains("DOCUMENT: DocB") {
            Ok("This document is not Relevant to the question".into())
        } else {
            Ok("According to DocC, roads are maintained yearly.".into())
        }
    };

    let answer = engine(service).answer_per_document("Roads?", &three_docs());

    assert_eq!(answer.contributing_sources, vec!["DocC".to_string()]);
    assert!(!answer.outcomes[0].is_relevant);
    assert!(answer.outcomes[0].answer_text.is_empty());
    assert!(!answer.outcomes[1].is_relevant);
}

#[test]
fn not_relevant_outcomes_never_contribute() {
    let service = |prompt: &str| -> Result<String, ServiceError> {
        if prompt.starts_with("Below are answers") {
            Ok("merged".into())
        } else if prompt.contains("DOCUMENT: DocB") {
            Ok("NOT RELEVANT".into())
        } else {
            Ok("something useful".into())
        }
    };

    let answer = engine(service).answer_per_document("Anything?", &three_docs());

    assert_eq!(
        answer.contributing_sources,
        vec!["DocA".to_string(), "DocC".to_string()]
    );
    assert!(!answer.contributing_sources.contains(&"DocB".to_string()));
}

#[test]
fn failing_document_is_skipped_and_batch_continues() {
    let service = |prompt: &str| -> Result<String, ServiceError> {
        if prompt.contains(SYNTHESIS_MARKER) {
            Ok("Based on DocB, DocC, both apply.".into())
        } else if prompt.contains("DOCUMENT: DocA") {
            Err(ServiceError::new("timeout"))
        } else {
            Ok("relevant detail".into())
        }
    };

    let answer = engine(service).answer_per_document("Which apply?", &three_docs());

    let sources: Vec<&str> = answer.outcomes.iter().map(|o| o.source_name.as_str()).collect();
    assert_eq!(sources, ["DocA", "DocB", "DocC"]);
    assert!(!answer.outcomes[0].is_relevant);
    assert_eq!(answer.relevant_documents_found(), 2);
    assert_eq!(answer.method, AnswerMethod::PerDocumentSynthesized);
    assert_eq!(answer.answer, "Based on DocB, DocC, both apply.");
}

#[test]
fn no_relevant_documents_yields_terminal_text() {
    let service = |_: &str| -> Result<String, ServiceError> { Ok("NOT RELEVANT".into()) };
    let config = QueryConfig::default();
    let expected = config.no_information_text.clone();
    let engine = RelevanceQueryEngine::new(service, config).unwrap();

    let answer = engine.answer("Unknown?", &three_docs(), QueryMode::PerDocument).unwrap();

    assert_eq!(answer.answer, expected);
    assert!(answer.contributing_sources.is_empty());
    assert_eq!(answer.relevant_documents_found(), 0);
    assert_eq!(answer.documents_analyzed, 3);
}

#[test]
fn every_document_failing_is_still_a_describable_outcome() {
    let service = |_: &str| -> Result<String, ServiceError> { Err(ServiceError::new("down")) };

    let answer = engine(service).answer_per_document("Anything?", &three_docs());

    assert_eq!(answer.answer, QueryConfig::default().no_information_text);
    assert!(answer.outcomes.iter().all(|o| !o.is_relevant));
}

#[test]
fn multiple_relevant_documents_are_synthesized_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let synthesis_prompt = Arc::new(Mutex::new(String::new()));
    let (counter, captured) = (calls.clone(), synthesis_prompt.clone());

    let service = move |prompt: &str| -> Result<String, ServiceError> {
        counter.fetch_add(1, Ordering::SeqCst);
        if prompt.contains(SYNTHESIS_MARKER) {
            *captured.lock().unwrap() = prompt.to_string();
            Ok("Based on DocA, DocB, DocC: combined.".into())
        } else if prompt.contains("DOCUMENT: DocA") {
            Ok("answer from alpha".into())
        } else if prompt.contains("DOCUMENT: DocB") {
            Ok("answer from beta".into())
        } else {
            Ok("answer from gamma".into())
        }
    };

    let answer = engine(service).answer_per_document("Summarize", &three_docs());

    assert_eq!(answer.method, AnswerMethod::PerDocumentSynthesized);
    assert_eq!(answer.answer, "Based on DocA, DocB, DocC: combined.");
    assert_eq!(calls.load(Ordering::SeqCst), 4);

    let prompt = synthesis_prompt.lock().unwrap().clone();
    for needle in [
        "FROM DocA:\nanswer from alpha",
        "FROM DocB:\nanswer from beta",
        "FROM DocC:\nanswer from gamma",
        "QUESTION: Summarize",
    ] {
        assert!(prompt.contains(needle), "missing {needle:?}");
    }
}

#[test]
fn synthesis_failure_falls_back_to_labelled_concatenation() {
    let service = |prompt: &str| -> Result<String, ServiceError> {
        if prompt.contains(SYNTHESIS_MARKER) {
            Err(ServiceError::new("quota exceeded"))
        } else if prompt.contains("DOCUMENT: DocA") {
            Ok("alpha says yes".into())
        } else if prompt.contains("DOCUMENT: DocC") {
            Ok("gamma says no".into())
        } else {
            Ok("NOT RELEVANT".into())
        }
    };

    let answer = engine(service).answer_per_document("Yes or no?", &three_docs());

    assert!(answer.synthesis_fallback);
    assert_eq!(answer.method, AnswerMethod::PerDocumentSynthesized);
    assert!(answer.answer.starts_with("Based on 2 documents (DocA, DocC)"));
    assert!(answer.answer.contains("[DocA]\nalpha says yes"));
    assert!(answer.answer.contains("[DocC]\ngamma says no"));
}

#[test]
fn fan_out_preserves_dataset_order_across_workers() {
    let docs: Vec<(String, String)> = (0..24)
        .map(|i| (format!("Doc{i:02}"), format!("Body of document number {i:02}")))
        .collect();
    let refs: Vec<(&str, &str)> = docs.iter().map(|(s, c)| (s.as_str(), c.as_str())).collect();
    let data = dataset(&refs);

    let service = |prompt: &str| -> Result<String, ServiceError> {
        let line = prompt
            .lines()
            .find(|l| l.starts_with("DOCUMENT: "))
            .unwrap_or_default();
        Ok(format!("seen {}", line.trim_start_matches("DOCUMENT: ")))
    };
    let config = QueryConfig {
        fanout_workers: 4,
        ..QueryConfig::default()
    };
    let engine = RelevanceQueryEngine::new(service, config).unwrap();

    let outcomes = engine.query_documents("Who?", &data.documents);

    let expected: Vec<QueryOutcome> = docs
        .iter()
        .map(|(source, _)| QueryOutcome::relevant(source.clone(), format!("seen {source}")))
        .collect();
    assert_eq!(outcomes, expected);
}

#[test]
fn combined_mode_sends_full_corpus_when_small() {
    let captured = Arc::new(Mutex::new(String::new()));
    let sink = captured.clone();
    let service = move |prompt: &str| -> Result<String, ServiceError> {
        *sink.lock().unwrap() = prompt.to_string();
        Ok("combined answer".into())
    };
    let data = three_docs();

    let answer = engine(service)
        .answer("What is covered?", &data, QueryMode::Combined)
        .unwrap();

    assert_eq!(answer.method, AnswerMethod::Combined);
    assert_eq!(answer.answer, "combined answer");
    assert!(!answer.reduced);
    assert_eq!(answer.knowledge_chars, data.combined_text.chars().count());
    assert_eq!(
        answer.contributing_sources,
        vec!["DocA".to_string(), "DocB".to_string(), "DocC".to_string()]
    );

    let prompt = captured.lock().unwrap().clone();
    assert!(prompt.contains(&data.combined_text));
    assert!(prompt.contains("REFERENCE DOCUMENTS: DocA, DocB, DocC"));
    assert!(prompt.contains("QUESTION: What is covered?"));
}

#[test]
fn combined_mode_reduces_oversized_corpus() {
    let captured = Arc::new(Mutex::new(String::new()));
    let sink = captured.clone();
    let service = move |prompt: &str| -> Result<String, ServiceError> {
        *sink.lock().unwrap() = prompt.to_string();
        Ok("reduced answer".into())
    };

    let long_paragraph = "This paragraph is long enough to be kept even without any keyword in it.";
    let body = format!(
        "Pasal 1 defines the state\nshort filler\n{long_paragraph}\n12345678901234567890123456789012345678901234567890123"
    );
    let data = dataset(&[("Law.txt", body.as_str())]);

    let config = QueryConfig {
        reduction_threshold_chars: 10,
        ..QueryConfig::default()
    };
    let engine = RelevanceQueryEngine::new(service, config).unwrap();
    let answer = engine.answer_combined("Pasal 1?", &data).unwrap();

    assert!(answer.reduced);
    let prompt = captured.lock().unwrap().clone();
    assert!(prompt.contains("=== DOCUMENT: Law.txt ==="));
    assert!(prompt.contains("Pasal 1 defines the state"));
    assert!(prompt.contains(long_paragraph));
    assert!(!prompt.contains("short filler"));
    assert!(!prompt.contains("1234567890123456789012345678901234567890"));
    assert!(prompt.contains("condensed"));
}

#[test]
fn reduction_caps_lines_per_document() {
    let lines: Vec<String> = (0..10).map(|i| format!("negara clause {i}")).collect();
    let body = lines.join("\n");
    let data = dataset(&[("Big.txt", body.as_str())]);

    let config = QueryConfig {
        max_lines_per_document: 3,
        ..QueryConfig::default()
    };
    let reduced = corpus_core::query::reduce_documents(&data.documents, &config);

    assert!(reduced.contains("negara clause 2"));
    assert!(!reduced.contains("negara clause 3"));
}

#[test]
fn combined_mode_surfaces_service_failure() {
    let service = |_: &str| -> Result<String, ServiceError> { Err(ServiceError::new("unavailable")) };

    let err = engine(service)
        .answer("Anything?", &three_docs(), QueryMode::Combined)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AnsweringService);
    assert!(err.to_string().contains("unavailable"));
}

struct StructuredService;

impl AnsweringService for StructuredService {
    fn answer(&self, _prompt: &str) -> Result<String, ServiceError> {
        Ok("merged".into())
    }

    fn answer_scoped(&self, prompt: &str, _sentinel: &str) -> Result<ScopedAnswer, ServiceError> {
        Ok(ScopedAnswer {
            is_relevant: prompt.contains("DOCUMENT: DocC"),
            text: "structured text".into(),
        })
    }
}

#[test]
fn structured_relevance_overrides_sentinel_matching() {
    let answer = engine(StructuredService).answer_per_document("Roads?", &three_docs());

    assert_eq!(answer.contributing_sources, vec!["DocC".to_string()]);
    assert_eq!(answer.answer, "structured text");
}

#[test]
fn synthesizer_single_outcome_needs_no_service_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let service = move |_: &str| -> Result<String, ServiceError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok("should not be used".into())
    };
    let synthesizer = AnswerSynthesizer::new(&service, "nothing found");

    let single = [QueryOutcome::relevant("DocB", "  exact text\nkept as is ")];
    let result = synthesizer.synthesize("Q", &single);
    assert_eq!(result.text, "  exact text\nkept as is ");
    assert!(!result.fallback);

    let none = synthesizer.synthesize("Q", &[]);
    assert_eq!(none.text, "nothing found");

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn query_mode_parses_interactive_prefixes() {
    assert_eq!("combined".parse::<QueryMode>().unwrap(), QueryMode::Combined);
    assert_eq!("Individual".parse::<QueryMode>().unwrap(), QueryMode::PerDocument);
    assert_eq!("per-document".parse::<QueryMode>().unwrap(), QueryMode::PerDocument);
    assert!("both".parse::<QueryMode>().is_err());
    assert_eq!(QueryMode::default(), QueryMode::Combined);
}

#[test]
fn free_text_sentinel_adapter() {
    let relevant = ScopedAnswer::from_sentinel("  According to DocA, yes.  ", "NOT RELEVANT");
    assert!(relevant.is_relevant);
    assert_eq!(relevant.text, "According to DocA, yes.");

    let irrelevant = ScopedAnswer::from_sentinel("not relevant", "NOT RELEVANT");
    assert!(!irrelevant.is_relevant);
}
