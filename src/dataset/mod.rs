pub mod assembler;
pub mod budgeting;
pub mod dataset;
pub mod fingerprint;

pub use assembler::DatasetAssembler;
pub use budgeting::{apply_budget, BudgetPacker, BudgetResult, Packed};
pub use dataset::{combine_documents, Dataset, DatasetMetadata};
pub use fingerprint::fingerprint_candidates;
