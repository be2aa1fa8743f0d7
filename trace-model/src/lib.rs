//! Typed traceability graph model shared by every pipeline stage.
//!
//! A [`TraceMap`] is the persisted unit: all [`Requirement`], [`DesignElement`],
//! and [`CodeComponent`] nodes for one `(repository, branch)`, plus the typed
//! [`Edge`]s between them. Nodes are modeled as a tagged variant ([`Node`])
//! rather than an untyped bag, per the "dynamic-typed element bags" design
//! note: shared fields live on each concrete struct, and callers match on
//! [`NodeKind`] rather than probing optional fields.

pub mod edge;
pub mod error;
pub mod ids;
pub mod map;
pub mod node;
pub mod pipeline_error;
pub mod semantic;
pub mod stats;

pub use edge::{Edge, EdgeKind, RelationshipType};
pub use error::ModelError;
pub use ids::IdAllocator;
pub use map::TraceMap;
pub use node::{CodeComponent, DesignElement, DesignElementType, Node, NodeKind, Priority,
    Requirement, RequirementType};
pub use pipeline_error::PipelineError;
pub use semantic::{CosineIndex, SemanticIndex};
pub use stats::ProcessingStats;
