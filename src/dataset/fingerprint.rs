use crate::document::CandidateDocument;
use crate::types::identifiers::DatasetFingerprint;

/// Fingerprint of a candidate set. Signatures are sorted before hashing, so
/// enumeration order never matters.
pub fn fingerprint_candidates(candidates: &[CandidateDocument]) -> DatasetFingerprint {
    DatasetFingerprint::from_signatures(candidates.iter().map(CandidateDocument::signature))
}
