//! Core C.2: clusters classified code changes into logical change sets.

pub mod error;
pub mod model;
pub mod pipeline;

pub use error::ChangeGroupError;
pub use model::{ClassifiedChange, LogicalChangeSet, UNGROUPED_SET_NAME};
pub use pipeline::group_changes;
