//! Orchestrates status classification, graph walk, and scoring across every
//! logical change set in a PR (spec §4.10).
//!
//! Scoring fans out one LLM batch per change set, concurrently (spec §5:
//! "scoring...parallelize over findings"), grounded on the same
//! `buffer_unordered` fan-out shape `relink::batch` uses — but unlike that
//! stage's batch-local retry-then-skip, a scoring failure here is fatal to
//! the whole run: Core C is read-only and §7's propagation policy for it is
//! "no recommendations this run, never a partial emission".

use futures::stream::{self, StreamExt};
use tracing::instrument;

use change_group::LogicalChangeSet;
use llm_gateway::LlmGateway;
use trace_model::TraceMap;

use crate::error::ImpactTraceError;
use crate::model::Finding;
use crate::score::score_findings;
use crate::status::classify_status;
use crate::walk::{gap_or_anomaly_finding, trace_impact};

/// Builds the unscored findings for one change set (spec §4.10 steps 1-3).
fn findings_for_change_set(map: &TraceMap, change_set: &LogicalChangeSet) -> Vec<Finding> {
    change_set
        .changes
        .iter()
        .flat_map(|change| {
            let status = classify_status(map, &change.classification);
            if status.is_traced() {
                trace_impact(map, status, &change.classification, &change_set.name)
            } else {
                vec![gap_or_anomaly_finding(status, &change.classification, &change_set.name)]
            }
        })
        .collect()
}

/// Runs the full impact trace for every logical change set, returning all
/// scored findings. Aborts on the first scoring failure rather than
/// skipping the offending change set (see module docs).
#[instrument(skip_all, fields(change_sets = change_sets.len()))]
pub async fn trace_and_score(
    gateway: &LlmGateway,
    map: &TraceMap,
    change_sets: &[LogicalChangeSet],
    concurrency: usize,
) -> Result<Vec<Finding>, ImpactTraceError> {
    let unscored: Vec<Vec<Finding>> = change_sets.iter().map(|cs| findings_for_change_set(map, cs)).collect();

    let scored = stream::iter(unscored)
        .map(|findings| score_findings(gateway, findings))
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut all = Vec::new();
    for result in scored {
        all.extend(result?);
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use change_classify::{ChangeNature, ChangeScope, ChangeType, ChangeVolume, CodeChangeClassification};
    use change_group::ClassifiedChange;

    fn change_set(name: &str, file: &str) -> LogicalChangeSet {
        LogicalChangeSet {
            name: name.to_string(),
            description: String::new(),
            changes: vec![ClassifiedChange {
                commit_hash: "abc".to_string(),
                commit_message: "msg".to_string(),
                classification: CodeChangeClassification {
                    file: file.to_string(),
                    change_type: ChangeType::Addition,
                    scope: ChangeScope::FunctionMethod,
                    nature: ChangeNature::NewFeature,
                    volume: ChangeVolume::Small,
                    reasoning: String::new(),
                },
            }],
            commit_messages: vec!["msg".to_string()],
        }
    }

    #[test]
    fn unmapped_addition_yields_a_gap_finding_without_hitting_the_gateway() {
        let map = TraceMap::new("acme/widgets", "main");
        let findings = findings_for_change_set(&map, &change_set("New feature", "src/new.rs"));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].affected_node.is_none());
    }
}
