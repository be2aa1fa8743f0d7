//! Hard validation and application of proposed edges into a [`TraceMap`].

use tracing::{debug, warn};
use trace_model::{EdgeKind, IdAllocator, ModelError, NodeKind, RelationshipType, TraceMap};

use crate::error::LinkClassifyError;
use crate::model::ProposedEdge;

/// Resolves a model-proposed endpoint to its surrogate ID.
///
/// The model is prompted with `reference_id`s, never surrogate IDs, so a
/// proposal's `source_id`/`target_id` is a `reference_id` in the common
/// case; it is accepted unchanged when it already happens to be a live
/// surrogate ID of the right kind (the model occasionally echoes one back
/// verbatim when it appears in context, e.g. from the D->D matrix).
fn resolve(map: &TraceMap, kind: NodeKind, candidate: &str) -> Option<String> {
    if let Some(n) = map.find_node(candidate) {
        if n.kind() == kind {
            return Some(n.id().to_string());
        }
    }
    map.find_node_by_reference(kind, candidate)
        .map(|n| n.id().to_string())
}

/// Validates and inserts every proposed edge of `expected_kind`.
///
/// D->D cycle ties are the one case spec §4.5 treats as a silent drop
/// ("tie-break: ... drop it") rather than a hard rejection; every other
/// validation failure (unresolvable endpoint, out-of-vocabulary
/// relationship type, illegal direction) raises immediately, per §4.5:
/// "rejections raise, not log-and-skip."
pub fn apply_proposed_edges(
    map: &mut TraceMap,
    alloc: &mut IdAllocator,
    expected_kind: EdgeKind,
    proposed: Vec<ProposedEdge>,
) -> Result<Vec<String>, LinkClassifyError> {
    let (source_kind, target_kind) = expected_kind.endpoint_kinds();
    let mut inserted = Vec::with_capacity(proposed.len());

    for edge in proposed {
        let source_id = resolve(map, source_kind, &edge.source_id)
            .ok_or_else(|| ModelError::UnknownEdgeEndpoint(edge.source_id.clone()))?;
        let target_id = resolve(map, target_kind, &edge.target_id)
            .ok_or_else(|| ModelError::UnknownEdgeEndpoint(edge.target_id.clone()))?;

        let relationship_type = RelationshipType::from_str(&edge.relationship_type).ok_or(
            ModelError::InvalidRelationshipType {
                source_kind,
                target_kind,
                relationship_type: edge.relationship_type.clone(),
            },
        )?;

        match map.insert_edge(alloc, &source_id, &target_id, relationship_type) {
            Ok(id) => {
                debug!(id, source = %source_id, target = %target_id, "edge inserted");
                inserted.push(id);
            }
            Err(ModelError::CycleDetected { .. }) if expected_kind == EdgeKind::DesignToDesign => {
                warn!(
                    source = %source_id,
                    target = %target_id,
                    "dropped candidate D->D edge: would create a cycle"
                );
            }
            Err(other) => return Err(LinkClassifyError::Validation(other)),
        }
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trace_model::{DesignElement, DesignElementType, Node};

    fn de(id: &str, reference_id: &str) -> Node {
        Node::DesignElement(DesignElement {
            id: id.to_string(),
            reference_id: reference_id.to_string(),
            name: reference_id.to_string(),
            description: String::new(),
            kind: DesignElementType::Class,
            section: "1".to_string(),
            file_path: "docs/sdd.md".to_string(),
        })
    }

    #[test]
    fn cycle_is_dropped_not_raised_for_dd() {
        let mut map = TraceMap::new("acme/widgets", "main");
        map.insert_node(de("DE-docs/sdd.md-001", "A")).unwrap();
        map.insert_node(de("DE-docs/sdd.md-002", "B")).unwrap();
        let mut alloc = map.allocator();

        apply_proposed_edges(
            &mut map,
            &mut alloc,
            EdgeKind::DesignToDesign,
            vec![ProposedEdge {
                source_id: "DE-docs/sdd.md-001".to_string(),
                target_id: "DE-docs/sdd.md-002".to_string(),
                relationship_type: "depends_on".to_string(),
            }],
        )
        .unwrap();

        let result = apply_proposed_edges(
            &mut map,
            &mut alloc,
            EdgeKind::DesignToDesign,
            vec![ProposedEdge {
                source_id: "DE-docs/sdd.md-002".to_string(),
                target_id: "DE-docs/sdd.md-001".to_string(),
                relationship_type: "depends_on".to_string(),
            }],
        )
        .unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn unknown_relationship_type_raises() {
        let mut map = TraceMap::new("acme/widgets", "main");
        map.insert_node(de("DE-docs/sdd.md-001", "A")).unwrap();
        map.insert_node(de("DE-docs/sdd.md-002", "B")).unwrap();
        let mut alloc = map.allocator();

        let err = apply_proposed_edges(
            &mut map,
            &mut alloc,
            EdgeKind::DesignToDesign,
            vec![ProposedEdge {
                source_id: "DE-docs/sdd.md-001".to_string(),
                target_id: "DE-docs/sdd.md-002".to_string(),
                relationship_type: "enables".to_string(),
            }],
        )
        .unwrap_err();

        assert!(matches!(err, LinkClassifyError::Validation(_)));
    }
}
