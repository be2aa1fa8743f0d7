//! Core C.3: traceability-status classification, graph-walk impact
//! tracing, and likelihood/severity scoring.

pub mod error;
pub mod model;
pub mod pipeline;
pub mod score;
pub mod status;
pub mod walk;

pub use error::ImpactTraceError;
pub use model::{
    AffectedNode, AnomalyKind, Finding, Likelihood, PathType, Severity, TraceabilityStatus,
};
pub use pipeline::trace_and_score;
pub use status::classify_status;
pub use walk::{gap_or_anomaly_finding, trace_impact};
