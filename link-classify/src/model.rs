//! Raw LLM output shape for all three classification sub-steps: an edge
//! between two reference/surrogate IDs with a relationship-type string,
//! validated (not trusted) once it reaches [`crate::apply`].

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProposedEdge {
    pub source_id: String,
    pub target_id: String,
    pub relationship_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposedEdges {
    pub edges: Vec<ProposedEdge>,
}
