//! Graph-model invariant violations (spec §3 I1-I4).

use thiserror::Error;

/// Violations of the invariants a [`crate::TraceMap`] must uphold.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// I1: `reference_id` must be unique within `(file_path, node_kind)`.
    #[error("duplicate reference_id `{reference_id}` in {file_path} ({kind:?})")]
    DuplicateReferenceId {
        file_path: String,
        reference_id: String,
        kind: crate::node::NodeKind,
    },

    /// I2: both edge endpoints must exist in the same map version.
    #[error("edge endpoint `{0}` does not exist in this map")]
    UnknownEdgeEndpoint(String),

    /// I4: `relationship_type` must be drawn from the endpoint pair's vocabulary.
    #[error(
        "relationship_type `{relationship_type}` is not valid between {source_kind:?} and {target_kind:?}"
    )]
    InvalidRelationshipType {
        source_kind: crate::node::NodeKind,
        target_kind: crate::node::NodeKind,
        relationship_type: String,
    },

    /// A source/target pair is not a graph-legal edge direction at all
    /// (e.g. CodeComponent -> Requirement).
    #[error("{source_kind:?} -> {target_kind:?} is not a legal edge direction")]
    IllegalEdgeDirection {
        source_kind: crate::node::NodeKind,
        target_kind: crate::node::NodeKind,
    },

    /// I3: the D->D subgraph must remain acyclic.
    #[error("edge `{source_id}` -> `{target_id}` would create a design-element cycle")]
    CycleDetected { source_id: String, target_id: String },
}
