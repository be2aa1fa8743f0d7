//! Core C.1: 4W (type/scope/nature/volume) code-change classification.

pub mod error;
pub mod model;
pub mod pipeline;
pub mod volume;

pub use error::ChangeClassifyError;
pub use model::{
    ChangeNature, ChangeScope, ChangeType, ChangeVolume, CodeChangeClassification,
    CommitClassification, CommitInput, DiffStatus, FileDiff,
};
pub use pipeline::{classify_commit, classify_commits};
pub use volume::bucket_volume;
