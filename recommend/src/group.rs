//! Groups filtered findings by target document and builds each document's
//! summary (spec §4.11 step 2).

use std::collections::BTreeMap;

use impact_trace::{AnomalyKind, Finding, Severity, TraceabilityStatus};

use crate::model::{DocumentSummary, UNMAPPED_TARGET_DOCUMENT};

fn target_document(finding: &Finding) -> String {
    finding
        .affected_node
        .as_ref()
        .map(|n| n.file_path.clone())
        .unwrap_or_else(|| UNMAPPED_TARGET_DOCUMENT.to_string())
}

fn anomaly_instruction(finding: &Finding) -> Option<String> {
    match finding.status {
        TraceabilityStatus::Gap => Some(format!(
            "{} has no documentation yet; add a design element and link it.",
            finding.changed_file
        )),
        TraceabilityStatus::Anomaly(kind) => Some(match kind {
            AnomalyKind::AdditionMapped => format!(
                "{} was added but already maps to a design element; confirm the existing link is still correct.",
                finding.changed_file
            ),
            AnomalyKind::DeletionUnmapped => format!(
                "{} was deleted without ever being linked; no action needed beyond noting the removal.",
                finding.changed_file
            ),
            AnomalyKind::ModificationUnmapped => format!(
                "{} changed but is not linked from any design element; establish a link.",
                finding.changed_file
            ),
            AnomalyKind::RenameUnmapped => format!(
                "{} was renamed but was never linked; establish a link under its new path.",
                finding.changed_file
            ),
        }),
        _ => None,
    }
}

/// One target document's findings, paired with its summary.
pub struct GroupedFindings {
    pub summary: DocumentSummary,
    pub findings: Vec<Finding>,
}

/// Groups `findings` by [`target_document`], preserving first-seen order
/// across documents.
pub fn group_by_document(findings: Vec<Finding>) -> Vec<GroupedFindings> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: BTreeMap<String, Vec<Finding>> = BTreeMap::new();

    for finding in findings {
        let doc = target_document(&finding);
        if !buckets.contains_key(&doc) {
            order.push(doc.clone());
        }
        buckets.entry(doc).or_default().push(finding);
    }

    order
        .into_iter()
        .map(|doc| {
            let findings = buckets.remove(&doc).unwrap_or_default();
            let major_or_fundamental_count = findings
                .iter()
                .filter(|f| matches!(f.severity, Some(Severity::Major) | Some(Severity::Fundamental)))
                .count();
            let mut sections_affected: Vec<String> = Vec::new();
            for f in &findings {
                if let Some(node) = &f.affected_node {
                    if !sections_affected.contains(&node.reference_id) {
                        sections_affected.push(node.reference_id.clone());
                    }
                }
            }
            let anomaly_instructions: Vec<String> = findings.iter().filter_map(anomaly_instruction).collect();

            GroupedFindings {
                summary: DocumentSummary {
                    target_document: doc,
                    finding_count: findings.len(),
                    major_or_fundamental_count,
                    sections_affected,
                    anomaly_instructions,
                },
                findings,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_trace::{AffectedNode, Likelihood};
    use trace_model::NodeKind;

    fn finding_with_doc(file_path: &str, severity: Severity) -> Finding {
        Finding {
            status: TraceabilityStatus::Modification,
            path_type: None,
            changed_file: "src/a.rs".to_string(),
            affected_node: Some(AffectedNode {
                id: "DE-docs/sdd.md-001".to_string(),
                kind: NodeKind::DesignElement,
                reference_id: "Book-Class".to_string(),
                name: "Book".to_string(),
                file_path: file_path.to_string(),
            }),
            source_change_set: "set".to_string(),
            likelihood: Some(Likelihood::Likely),
            severity: Some(severity),
            reasoning: None,
        }
    }

    #[test]
    fn groups_by_file_path_and_counts_major() {
        let findings = vec![
            finding_with_doc("docs/sdd.md", Severity::Major),
            finding_with_doc("docs/sdd.md", Severity::Moderate),
            finding_with_doc("docs/srs.md", Severity::Fundamental),
        ];
        let groups = group_by_document(findings);
        assert_eq!(groups.len(), 2);
        let sdd = groups.iter().find(|g| g.summary.target_document == "docs/sdd.md").unwrap();
        assert_eq!(sdd.summary.finding_count, 2);
        assert_eq!(sdd.summary.major_or_fundamental_count, 1);
    }

    #[test]
    fn gap_finding_falls_back_to_unmapped_bucket() {
        let finding = Finding {
            status: TraceabilityStatus::Gap,
            path_type: None,
            changed_file: "src/new.rs".to_string(),
            affected_node: None,
            source_change_set: "set".to_string(),
            likelihood: Some(Likelihood::Likely),
            severity: Some(Severity::Major),
            reasoning: None,
        };
        let groups = group_by_document(vec![finding]);
        assert_eq!(groups[0].summary.target_document, UNMAPPED_TARGET_DOCUMENT);
        assert_eq!(groups[0].summary.anomaly_instructions.len(), 1);
    }
}
