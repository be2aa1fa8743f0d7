//! Shared failure taxonomy every pipeline crate's own error type converts
//! into at its boundary (spec §7).

use thiserror::Error;

/// Coarse failure category reported by any of the three pipelines.
///
/// Individual crates (`doc-extract`, `link-classify`, `relink`, ...) define
/// their own richer error enums and `impl From<TheirError> for PipelineError`
/// at the crate boundary, the way `mr-reviewer`'s step errors fold into its
/// top-level `Error`.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input (document, snapshot, prior graph) was missing.
    #[error("required input missing: {0}")]
    InputMissing(String),

    /// Repository/document scan failed before any LLM call was made.
    #[error("scan failed: {0}")]
    ScanFailed(String),

    /// The LLM returned output that did not parse or satisfy its schema
    /// after retries.
    #[error("LLM returned unusable output for {task}: {reason}")]
    LlmBadOutput { task: String, reason: String },

    /// Output parsed but failed semantic/business validation (e.g. an
    /// unresolved `target_id` in a matrix row).
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// A concurrent writer updated the map since this writer's read
    /// (§7: "retry once; then fatal").
    #[error("concurrent writer detected: {0}")]
    GraphConflict(String),

    /// The graph store backend itself failed (I/O, serialization).
    #[error("graph store backend error: {0}")]
    GraphBackend(String),

    /// A bounded operation (LLM call, batch, whole pipeline run) exceeded
    /// its deadline.
    #[error("operation timed out: {0}")]
    Timeout(String),
}
