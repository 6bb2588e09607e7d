use tracing::{debug, warn};

use crate::query::prompt;
use crate::query::service::AnsweringService;
use crate::types::answer::QueryOutcome;

/// Result of merging relevant per-document answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub text: String,
    /// The synthesis call failed and the answers were concatenated instead.
    pub fallback: bool,
}

/// Merges relevant per-document answers into one response.
pub struct AnswerSynthesizer<'a, A: ?Sized> {
    service: &'a A,
    no_information_text: &'a str,
}

impl<'a, A: AnsweringService + ?Sized> AnswerSynthesizer<'a, A> {
    pub fn new(service: &'a A, no_information_text: &'a str) -> Self {
        Self {
            service,
            no_information_text,
        }
    }

    /// - none relevant: the no-information text
    /// - one relevant: that answer, verbatim, without a service call
    /// - several: one synthesis call, or a labelled concatenation if it fails
    pub fn synthesize(&self, question: &str, relevant: &[QueryOutcome]) -> Synthesis {
        match relevant {
            [] => Synthesis {
                text: self.no_information_text.to_string(),
                fallback: false,
            },
            [single] => Synthesis {
                text: single.answer_text.clone(),
                fallback: false,
            },
            many => {
                let request = prompt::synthesis_prompt(question, many);
                match self.service.answer(&request) {
                    Ok(text) => {
                        debug!(sources = many.len(), "synthesized answers");
                        Synthesis {
                            text,
                            fallback: false,
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, sources = many.len(), "synthesis failed, concatenating answers");
                        Synthesis {
                            text: prompt::concatenate_answers(many),
                            fallback: true,
                        }
                    }
                }
            }
        }
    }
}
