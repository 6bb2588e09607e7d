use crate::error::ServiceError;
use crate::types::answer::ScopedAnswer;

/// The external answering service: one prompt in, one text out.
///
/// Calls may block for a long time; callers own timeouts and cancellation.
pub trait AnsweringService: Send + Sync {
    fn answer(&self, prompt: &str) -> Result<String, ServiceError>;

    /// Answer a prompt scoped to a single document.
    ///
    /// Adapters for services with structured output should override this.
    /// The default reads free text and treats the sentinel as "not
    /// relevant".
    fn answer_scoped(&self, prompt: &str, sentinel: &str) -> Result<ScopedAnswer, ServiceError> {
        self.answer(prompt)
            .map(|text| ScopedAnswer::from_sentinel(text, sentinel))
    }
}

impl<F> AnsweringService for F
where
    F: Fn(&str) -> Result<String, ServiceError> + Send + Sync,
{
    fn answer(&self, prompt: &str) -> Result<String, ServiceError> {
        self(prompt)
    }
}
