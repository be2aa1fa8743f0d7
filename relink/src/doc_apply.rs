//! Applies a [`doc_diff::Reconciliation`] onto the map (spec §4.7 steps 1/3/6,
//! the document half).

use doc_diff::{CandidateChange, FieldDelta, ModifiedElement, Reconciliation};
use trace_model::{DesignElement, IdAllocator, Node, NodeKind, Requirement, TraceMap};

use crate::error::RelinkError;

/// Outcome of folding one file's reconciliation into the map: the
/// post-change requirement/design-element candidates that must be fed into
/// link generation (spec §4.7 step 3: "all `added` doc nodes, and every
/// `modified` doc node in its post-change form").
#[derive(Debug, Default)]
pub struct AppliedReconciliation {
    pub candidate_requirements: Vec<Requirement>,
    pub candidate_design_elements: Vec<DesignElement>,
}

/// Finds a requirement/design-element node by `(file_path, reference_id)`,
/// the identifiers a reconciliation's entries carry.
fn find_doc_node<'a>(map: &'a TraceMap, file_path: &str, reference_id: &str) -> Option<&'a Node> {
    map.nodes.iter().find(|n| {
        matches!(n, Node::Requirement(_) | Node::DesignElement(_))
            && n.file_path() == file_path
            && n.reference_id() == reference_id
    })
}

/// Merges `changes`' `to` values onto `node`'s serialized form and
/// deserializes the result back into the same variant.
fn apply_field_deltas(
    node: &Node,
    changes: &std::collections::HashMap<String, FieldDelta>,
) -> Result<Node, RelinkError> {
    let mut value = serde_json::to_value(node)
        .map_err(|e| RelinkError::MalformedChange(e.to_string()))?;
    if let Some(obj) = value.as_object_mut() {
        for (field, delta) in changes {
            obj.insert(field.clone(), delta.to.clone());
        }
    }
    serde_json::from_value(value).map_err(|e| RelinkError::MalformedChange(e.to_string()))
}

/// Builds a brand-new node from an `added` candidate's `full_data`,
/// minting its surrogate ID from `alloc`.
fn build_added_node(
    alloc: &mut IdAllocator,
    file_path: &str,
    candidate: &CandidateChange,
) -> Result<Node, RelinkError> {
    match candidate.element_type.to_lowercase().as_str() {
        "requirement" => {
            let extracted: doc_extract::ExtractedRequirement =
                serde_json::from_value(candidate.full_data.clone())
                    .map_err(|e| RelinkError::MalformedChange(e.to_string()))?;
            let id = alloc.next_doc_node_id(NodeKind::Requirement, file_path);
            Ok(Node::Requirement(Requirement {
                id,
                reference_id: extracted.reference_id,
                title: extracted.title,
                description: extracted.description,
                kind: extracted.kind,
                priority: extracted.priority,
                section: extracted.section,
                file_path: file_path.to_string(),
            }))
        }
        "design_element" => {
            let extracted: doc_extract::ExtractedDesignElement =
                serde_json::from_value(candidate.full_data.clone())
                    .map_err(|e| RelinkError::MalformedChange(e.to_string()))?;
            let id = alloc.next_doc_node_id(NodeKind::DesignElement, file_path);
            Ok(Node::DesignElement(DesignElement {
                id,
                reference_id: extracted.reference_id,
                name: extracted.name,
                description: extracted.description,
                kind: extracted.kind,
                section: extracted.section,
                file_path: file_path.to_string(),
            }))
        }
        other => Err(RelinkError::MalformedChange(format!(
            "unrecognized element_type '{other}'"
        ))),
    }
}

fn push_candidate(out: &mut AppliedReconciliation, node: &Node) {
    match node {
        Node::Requirement(r) => out.candidate_requirements.push(r.clone()),
        Node::DesignElement(d) => out.candidate_design_elements.push(d.clone()),
        Node::CodeComponent(_) => {}
    }
}

/// Folds one file's reconciliation into `map`: deletes retire their node and
/// every touching edge; modifications drop their stale edges and land their
/// post-change fields in place; additions mint a fresh node. Returns the
/// post-change candidates link generation must see.
pub fn apply_reconciliation(
    map: &mut TraceMap,
    alloc: &mut IdAllocator,
    file_path: &str,
    reconciliation: &Reconciliation,
) -> Result<AppliedReconciliation, RelinkError> {
    let mut out = AppliedReconciliation::default();

    for reference_id in &reconciliation.deleted {
        if let Some(id) = find_doc_node(map, file_path, reference_id).map(|n| n.id().to_string()) {
            map.remove_node(&id);
        }
    }

    for modified in &reconciliation.modified {
        let ModifiedElement {
            reference_id,
            changes,
            ..
        } = modified;
        if let Some(node) = find_doc_node(map, file_path, reference_id) {
            let id = node.id().to_string();
            let updated = apply_field_deltas(node, changes)?;
            map.remove_edges_touching(&id);
            map.replace_node(&id, updated.clone());
            push_candidate(&mut out, &updated);
        }
    }

    for added in &reconciliation.added {
        let node = build_added_node(alloc, file_path, added)?;
        map.insert_node(node.clone())?;
        push_candidate(&mut out, &node);
    }

    Ok(out)
}
