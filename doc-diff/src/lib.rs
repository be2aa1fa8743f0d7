//! Core B.1: per-document change detection against the baseline graph via a
//! two-pass propose/reconcile LLM protocol.

pub mod error;
pub mod ground_truth;
pub mod model;
pub mod pipeline;

pub use error::DocDiffError;
pub use ground_truth::ground_truth_for_file;
pub use model::{
    CandidateChange, CandidateChanges, ChangeKind, FieldDelta, FileChangeStatus, ModifiedElement,
    Reconciliation,
};
pub use pipeline::{analyze_file, reclassify};
