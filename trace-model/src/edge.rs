//! Typed, directed edges between graph nodes, and the fixed relationship
//! vocabulary per endpoint-kind pair (spec §3's edge-kind table).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::node::NodeKind;

/// Relationship type drawn from the fixed vocabulary. Unlike node `type`
/// fields, this one is genuinely closed — §4.5 treats an unrecognized
/// value as a hard validation failure, not an open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Satisfies,
    Realizes,
    Refines,
    DependsOn,
    Implements,
}

impl RelationshipType {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipType::Satisfies => "satisfies",
            RelationshipType::Realizes => "realizes",
            RelationshipType::Refines => "refines",
            RelationshipType::DependsOn => "depends_on",
            RelationshipType::Implements => "implements",
        }
    }

    pub fn from_str(s: &str) -> Option<RelationshipType> {
        match s {
            "satisfies" => Some(RelationshipType::Satisfies),
            "realizes" => Some(RelationshipType::Realizes),
            "refines" => Some(RelationshipType::Refines),
            "depends_on" => Some(RelationshipType::DependsOn),
            "implements" => Some(RelationshipType::Implements),
            _ => None,
        }
    }
}

/// The three directed edge kinds the graph allows, keyed by
/// `(source kind, target kind)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Requirement -> DesignElement.
    RequirementToDesign,
    /// DesignElement -> DesignElement.
    DesignToDesign,
    /// DesignElement -> CodeComponent.
    DesignToCode,
}

impl EdgeKind {
    /// Resolves the edge kind for a `(source, target)` node-kind pair, or
    /// `None` if that pair is not a graph-legal edge direction.
    pub fn for_endpoints(source: NodeKind, target: NodeKind) -> Option<EdgeKind> {
        match (source, target) {
            (NodeKind::Requirement, NodeKind::DesignElement) => {
                Some(EdgeKind::RequirementToDesign)
            }
            (NodeKind::DesignElement, NodeKind::DesignElement) => Some(EdgeKind::DesignToDesign),
            (NodeKind::DesignElement, NodeKind::CodeComponent) => Some(EdgeKind::DesignToCode),
            _ => None,
        }
    }

    /// Relationship types this edge kind may legally carry (spec §3 table).
    pub fn allowed_relationships(self) -> &'static [RelationshipType] {
        match self {
            EdgeKind::RequirementToDesign => {
                &[RelationshipType::Satisfies, RelationshipType::Realizes]
            }
            EdgeKind::DesignToDesign => &[
                RelationshipType::Refines,
                RelationshipType::DependsOn,
                RelationshipType::Realizes,
            ],
            EdgeKind::DesignToCode => {
                &[RelationshipType::Implements, RelationshipType::Realizes]
            }
        }
    }

    /// The `(source kind, target kind)` pair this edge kind connects, the
    /// inverse of [`EdgeKind::for_endpoints`].
    pub fn endpoint_kinds(self) -> (NodeKind, NodeKind) {
        match self {
            EdgeKind::RequirementToDesign => (NodeKind::Requirement, NodeKind::DesignElement),
            EdgeKind::DesignToDesign => (NodeKind::DesignElement, NodeKind::DesignElement),
            EdgeKind::DesignToCode => (NodeKind::DesignElement, NodeKind::CodeComponent),
        }
    }

    /// ID namespace prefix for edges of this kind (`RD`, `DD`, `DC`).
    pub fn id_prefix(self) -> &'static str {
        match self {
            EdgeKind::RequirementToDesign => "RD",
            EdgeKind::DesignToDesign => "DD",
            EdgeKind::DesignToCode => "DC",
        }
    }
}

/// A directed, typed link between two nodes.
///
/// Edges are created/destroyed as a unit — a relationship-type change is a
/// delete-then-recreate, never an in-place mutation (spec §3 lifecycle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Stable surrogate ID: `RD-<NNN>` / `DD-<NNN>` / `DC-<NNN>`.
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub relationship_type: RelationshipType,
    pub created_at: DateTime<Utc>,
}

impl Edge {
    pub fn kind(&self) -> Option<EdgeKind> {
        let source = NodeKind::from_id(&self.source_id)?;
        let target = NodeKind::from_id(&self.target_id)?;
        EdgeKind::for_endpoints(source, target)
    }

    /// Whether this edge touches the given node ID on either end.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_id == node_id || self.target_id == node_id
    }
}
