//! Impact trace: the 1-2 hop outbound-edge-reversal walk and gap/anomaly
//! merge (spec §4.10 steps 2-3).

use change_classify::CodeChangeClassification;
use trace_model::{EdgeKind, Node, TraceMap};

use crate::model::{AffectedNode, Finding, PathType, TraceabilityStatus};

fn to_affected_node(node: &Node) -> AffectedNode {
    AffectedNode {
        id: node.id().to_string(),
        kind: node.kind(),
        reference_id: node.reference_id().to_string(),
        name: match node {
            Node::Requirement(r) => r.title.clone(),
            Node::DesignElement(d) => d.name.clone(),
            Node::CodeComponent(c) => c.name.clone(),
        },
        file_path: node.file_path().to_string(),
    }
}

/// Walks outbound from the `CodeComponent` matching `change.file`: direct
/// hop is D->C reversed (the design elements that implement this
/// component); indirect hop is D->D reversed and R->D reversed from each
/// of those (spec §4.10 step 2: "D->C⁻¹ then D->D⁻¹ and R->D⁻¹").
///
/// Only called for statuses `{Modification, Outdated, Rename}` — callers
/// must check [`TraceabilityStatus::is_traced`] first.
pub fn trace_impact(
    map: &TraceMap,
    status: TraceabilityStatus,
    change: &CodeChangeClassification,
    source_change_set: &str,
) -> Vec<Finding> {
    debug_assert!(status.is_traced());

    let Some(component) = map.code_components().find(|c| c.path == change.file) else {
        return Vec::new();
    };

    let direct_design_elements: Vec<&Node> = map
        .edges
        .iter()
        .filter(|e| e.kind() == Some(EdgeKind::DesignToCode) && e.target_id == component.id)
        .filter_map(|e| map.find_node(&e.source_id))
        .collect();

    let mut findings = Vec::new();
    let mut seen_ids: Vec<&str> = Vec::new();

    for design_element in &direct_design_elements {
        seen_ids.push(design_element.id());
        findings.push(Finding {
            status,
            path_type: Some(PathType::Direct),
            changed_file: change.file.clone(),
            affected_node: Some(to_affected_node(design_element)),
            source_change_set: source_change_set.to_string(),
            likelihood: None,
            severity: None,
            reasoning: None,
        });
    }

    for design_element in &direct_design_elements {
        let indirect: Vec<&Node> = map
            .edges
            .iter()
            .filter(|e| {
                matches!(e.kind(), Some(EdgeKind::DesignToDesign) | Some(EdgeKind::RequirementToDesign))
                    && e.target_id == design_element.id()
            })
            .filter_map(|e| map.find_node(&e.source_id))
            .collect();

        for node in indirect {
            if seen_ids.contains(&node.id()) {
                continue;
            }
            seen_ids.push(node.id());
            findings.push(Finding {
                status,
                path_type: Some(PathType::Indirect),
                changed_file: change.file.clone(),
                affected_node: Some(to_affected_node(node)),
                source_change_set: source_change_set.to_string(),
                likelihood: None,
                severity: None,
                reasoning: None,
            });
        }
    }

    findings
}

/// Builds the untraced `{Gap, Anomaly}` finding for a change whose status
/// doesn't walk the graph (spec §4.10 step 3's merge input).
pub fn gap_or_anomaly_finding(
    status: TraceabilityStatus,
    change: &CodeChangeClassification,
    source_change_set: &str,
) -> Finding {
    debug_assert!(!status.is_traced());
    Finding {
        status,
        path_type: None,
        changed_file: change.file.clone(),
        affected_node: None,
        source_change_set: source_change_set.to_string(),
        likelihood: None,
        severity: None,
        reasoning: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use change_classify::{ChangeNature, ChangeScope, ChangeType, ChangeVolume};
    use trace_model::{CodeComponent, DesignElement, DesignElementType, Requirement, RequirementType, Priority, RelationshipType};

    fn change(file: &str) -> CodeChangeClassification {
        CodeChangeClassification {
            file: file.to_string(),
            change_type: ChangeType::Modification,
            scope: ChangeScope::FunctionMethod,
            nature: ChangeNature::BugFix,
            volume: ChangeVolume::Small,
            reasoning: String::new(),
        }
    }

    /// REQ-001 -> Book-Class -> Loan-Class -> CC-001 (src/loan.rs), so a
    /// modification to `src/loan.rs` should surface a Direct finding on
    /// `Loan-Class` and Indirect findings on `Book-Class` (D->D reversed)
    /// and `REQ-001` (R->D reversed).
    fn chained_map() -> TraceMap {
        let mut map = TraceMap::new("acme/widgets", "main");
        map.insert_node(Node::Requirement(Requirement {
            id: "REQ-docs/srs.md-001".to_string(),
            reference_id: "REQ-001".to_string(),
            title: "Borrowing".to_string(),
            description: String::new(),
            kind: RequirementType::Functional,
            priority: Priority::Medium,
            section: "1".to_string(),
            file_path: "docs/srs.md".to_string(),
        }))
        .unwrap();
        map.insert_node(Node::DesignElement(DesignElement {
            id: "DE-docs/sdd.md-001".to_string(),
            reference_id: "Book-Class".to_string(),
            name: "Book".to_string(),
            description: String::new(),
            kind: DesignElementType::Class,
            section: "4.1".to_string(),
            file_path: "docs/sdd.md".to_string(),
        }))
        .unwrap();
        map.insert_node(Node::DesignElement(DesignElement {
            id: "DE-docs/sdd.md-002".to_string(),
            reference_id: "Loan-Class".to_string(),
            name: "Loan".to_string(),
            description: String::new(),
            kind: DesignElementType::Class,
            section: "4.2".to_string(),
            file_path: "docs/sdd.md".to_string(),
        }))
        .unwrap();
        map.insert_node(Node::CodeComponent(CodeComponent {
            id: "CC-001".to_string(),
            path: "src/loan.rs".to_string(),
            name: "loan.rs".to_string(),
            kind: "rs".to_string(),
        }))
        .unwrap();

        let mut alloc = map.allocator();
        map.insert_edge(&mut alloc, "REQ-docs/srs.md-001", "DE-docs/sdd.md-001", RelationshipType::Satisfies)
            .unwrap();
        map.insert_edge(&mut alloc, "DE-docs/sdd.md-001", "DE-docs/sdd.md-002", RelationshipType::DependsOn)
            .unwrap();
        map.insert_edge(&mut alloc, "DE-docs/sdd.md-002", "CC-001", RelationshipType::Implements)
            .unwrap();
        map
    }

    #[test]
    fn direct_and_indirect_hops_are_distinguished() {
        let map = chained_map();
        let findings = trace_impact(&map, TraceabilityStatus::Modification, &change("src/loan.rs"), "Loan fix");

        let direct: Vec<_> = findings.iter().filter(|f| f.path_type == Some(PathType::Direct)).collect();
        let indirect: Vec<_> = findings.iter().filter(|f| f.path_type == Some(PathType::Indirect)).collect();

        assert_eq!(direct.len(), 1);
        assert_eq!(direct[0].affected_node.as_ref().unwrap().reference_id, "Loan-Class");
        assert_eq!(indirect.len(), 2);
        let indirect_refs: Vec<&str> = indirect
            .iter()
            .map(|f| f.affected_node.as_ref().unwrap().reference_id.as_str())
            .collect();
        assert!(indirect_refs.contains(&"Book-Class"));
        assert!(indirect_refs.contains(&"REQ-001"));
    }

    #[test]
    fn unmapped_component_yields_no_findings() {
        let map = chained_map();
        let findings = trace_impact(&map, TraceabilityStatus::Modification, &change("src/unmapped.rs"), "x");
        assert!(findings.is_empty());
    }
}
