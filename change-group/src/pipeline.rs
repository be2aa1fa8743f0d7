//! Clusters classified changes into named logical sets (spec §4.9).
//!
//! The model proposes groups by index into the flattened change list; it is
//! never trusted to preserve coverage on its own. A repair pass afterwards
//! (mirroring the validate-then-sanitize shape used for other free-form LLM
//! output in this codebase) guarantees every input change ends up in
//! exactly one output set, dropping duplicate claims and sweeping omissions
//! into a fallback set.

use std::collections::HashSet;

use tracing::{instrument, warn};

use llm_gateway::{LlmGateway, TaskType};

use crate::error::ChangeGroupError;
use crate::model::{
    ClassifiedChange, LlmGroupingBatch, LogicalChangeSet, UNGROUPED_SET_NAME,
};

const SYSTEM_PROMPT: &str = "You group a list of code changes into logical change sets: changes \
that together implement one coherent piece of work. Respond with JSON only: {\"groups\": \
[{\"name\", \"description\", \"indices\": [...]}]}. `indices` are 0-based positions into the \
given change list. Every index must appear in exactly one group. Prefer fewer, coherent groups \
over one group per change.";

/// Groups `changes` into logical sets with a single LLM call, then repairs
/// the result so every input appears exactly once.
#[instrument(skip_all, fields(changes = changes.len()))]
pub async fn group_changes(
    gateway: &LlmGateway,
    changes: &[ClassifiedChange],
) -> Result<Vec<LogicalChangeSet>, ChangeGroupError> {
    if changes.is_empty() {
        return Ok(Vec::new());
    }

    let listing: Vec<serde_json::Value> = changes
        .iter()
        .enumerate()
        .map(|(i, c)| {
            serde_json::json!({
                "index": i,
                "file": c.classification.file,
                "type": c.classification.change_type,
                "scope": c.classification.scope,
                "nature": c.classification.nature,
                "commit_message": c.commit_message,
            })
        })
        .collect();
    let listing_json = serde_json::to_string(&listing).unwrap_or_default();

    let prompt = format!("Changes:\n{listing_json}\n\nGroup these into logical change sets.");

    let batch: LlmGroupingBatch = gateway
        .generate(&prompt, Some(SYSTEM_PROMPT), TaskType::ChangeGrouping)
        .await?;

    Ok(repair_groups(changes, batch))
}

/// Turns the model's raw index claims into [`LogicalChangeSet`]s, enforcing
/// that every change in `changes` is covered exactly once.
fn repair_groups(changes: &[ClassifiedChange], batch: LlmGroupingBatch) -> Vec<LogicalChangeSet> {
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut sets = Vec::with_capacity(batch.groups.len());

    for group in batch.groups {
        let mut members = Vec::new();
        for index in group.indices {
            if index >= changes.len() {
                warn!(index, "change grouping: dropping out-of-range index");
                continue;
            }
            if !claimed.insert(index) {
                warn!(index, group = %group.name, "change grouping: dropping duplicate claim");
                continue;
            }
            members.push(index);
        }
        if members.is_empty() {
            continue;
        }
        sets.push(build_set(changes, &members, group.name, group.description));
    }

    let leftovers: Vec<usize> = (0..changes.len()).filter(|i| !claimed.contains(i)).collect();
    if !leftovers.is_empty() {
        warn!(
            count = leftovers.len(),
            "change grouping: model omitted changes, sweeping into fallback set"
        );
        sets.push(build_set(
            changes,
            &leftovers,
            UNGROUPED_SET_NAME.to_string(),
            "Changes the grouping pass did not assign to a named set.".to_string(),
        ));
    }

    sets
}

fn build_set(
    changes: &[ClassifiedChange],
    indices: &[usize],
    name: String,
    description: String,
) -> LogicalChangeSet {
    let mut commit_messages: Vec<String> = Vec::new();
    let mut set_changes = Vec::with_capacity(indices.len());
    for &i in indices {
        let change = &changes[i];
        set_changes.push(change.clone());
        if !commit_messages.contains(&change.commit_message) {
            commit_messages.push(change.commit_message.clone());
        }
    }
    LogicalChangeSet {
        name,
        description,
        changes: set_changes,
        commit_messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use change_classify::{ChangeNature, ChangeScope, ChangeType, ChangeVolume, CodeChangeClassification};
    use crate::model::LlmGroup;

    fn change(file: &str, commit: &str) -> ClassifiedChange {
        ClassifiedChange {
            commit_hash: commit.to_string(),
            commit_message: format!("{commit} message"),
            classification: CodeChangeClassification {
                file: file.to_string(),
                change_type: ChangeType::Modification,
                scope: ChangeScope::FunctionMethod,
                nature: ChangeNature::BugFix,
                volume: ChangeVolume::Small,
                reasoning: "because".to_string(),
            },
        }
    }

    #[test]
    fn every_change_lands_in_exactly_one_set_despite_gaps_and_overlaps() {
        let changes = vec![change("a.rs", "c1"), change("b.rs", "c1"), change("c.rs", "c2")];
        let batch = LlmGroupingBatch {
            groups: vec![
                LlmGroup { name: "Fix".to_string(), description: "fixes a".to_string(), indices: vec![0, 0] },
                LlmGroup { name: "Fix".to_string(), description: "dup claim".to_string(), indices: vec![0] },
            ],
        };
        let sets = repair_groups(&changes, batch);
        let total: usize = sets.iter().map(|s| s.changes.len()).sum();
        assert_eq!(total, changes.len());
        assert!(sets.iter().any(|s| s.name == UNGROUPED_SET_NAME));
    }

    #[test]
    fn empty_input_yields_no_sets() {
        assert!(repair_groups(&[], LlmGroupingBatch::default()).is_empty());
    }
}
