pub mod answer;
pub mod identifiers;

pub use answer::{AnswerMethod, QueryMode, QueryOutcome, ScopedAnswer, SynthesizedAnswer};
pub use identifiers::{ContentHash, DatasetFingerprint, FINGERPRINT_LEN};
