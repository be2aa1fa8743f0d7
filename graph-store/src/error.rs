//! Store failure kinds (spec §4.1).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no map recorded for {repository}@{branch}")]
    NotFound { repository: String, branch: String },

    /// A concurrent writer updated the map since this writer's read; per
    /// §5, the orchestrator may retry once, then treats this as fatal.
    #[error("concurrent writer detected for {repository}@{branch}")]
    Conflict { repository: String, branch: String },

    #[error("graph store backend error: {0}")]
    Backend(String),
}
