//! Per-commit 4W classification (spec §4.8).

use tracing::instrument;

use llm_gateway::{LlmGateway, TaskType};

use crate::error::ChangeClassifyError;
use crate::model::{
    CodeChangeClassification, CommitClassification, CommitInput, LlmClassificationBatch,
};
use crate::volume::bucket_volume;

const SYSTEM_PROMPT: &str = "You classify code changes along two dimensions: scope (where the \
change lands) and nature (why it was made). Respond with JSON only: {\"classifications\": \
[{\"file\", \"scope\", \"nature\", \"reasoning\"}]}, one entry per file, in the given order. \
scope must be one of: Function/Method, Class/Interface/Struct/Type, Module/Package/Namespace, \
File, API Contract, Configuration, Dependencies, Build Scripts, Infrastructure Code, Test Code, \
Documentation, Cross-cutting Concerns. nature must be one of: New Feature, Feature Enhancement, \
Bug Fix, Security Fix, Refactoring, Performance Optimization, Code Style/Formatting, Technical \
Debt Reduction, Readability Improvement, Error Handling Improvement, Dependency Management, \
Build Process Improvement, Tooling Configuration, API Change, External System Integration, \
Documentation Update, UI/UX Adjustment, Static Content Update, Code Deprecation/Removal, Revert, \
Merge Conflict Resolution, License Update, Experimental, Chore, Other.";

/// Classifies every file changed in one commit with a single LLM call.
///
/// `type` and `volume` are never asked of the model: both are facts already
/// known from the diff (VCS status, added/deleted line counts), so only
/// `scope`/`nature` — genuine judgment calls — go through the gateway.
#[instrument(skip_all, fields(commit = %commit.commit_hash, files = commit.diffs.len()))]
pub async fn classify_commit(
    gateway: &LlmGateway,
    commit: &CommitInput,
) -> Result<CommitClassification, ChangeClassifyError> {
    if commit.diffs.is_empty() {
        return Ok(CommitClassification {
            commit_hash: commit.commit_hash.clone(),
            commit_message: commit.commit_message.clone(),
            classifications: Vec::new(),
        });
    }

    let files_json = serde_json::to_string(
        &commit
            .diffs
            .iter()
            .map(|d| (d.file_path.as_str(), d.patch.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();

    let prompt = format!(
        "Commit message: {}\n\nChanged files (path, patch):\n{files_json}\n\n\
        Classify scope and nature for each file, in the given order.",
        commit.commit_message
    );

    let batch: LlmClassificationBatch = gateway
        .generate(&prompt, Some(SYSTEM_PROMPT), TaskType::ChangeClassification)
        .await?;

    let classifications = commit
        .diffs
        .iter()
        .map(|diff| {
            let matched = batch.classifications.iter().find(|c| c.file == diff.file_path);
            let (scope, nature, reasoning) = match matched {
                Some(c) => (c.scope.clone(), c.nature.clone(), c.reasoning.clone()),
                None => (
                    crate::model::ChangeScope::Other("Unclassified".to_string()),
                    crate::model::ChangeNature::Other("Unclassified".to_string()),
                    "model omitted this file from its response".to_string(),
                ),
            };
            CodeChangeClassification {
                file: diff.file_path.clone(),
                change_type: diff.status.into(),
                scope,
                nature,
                volume: bucket_volume(diff.added_lines, diff.deleted_lines),
                reasoning,
            }
        })
        .collect();

    Ok(CommitClassification {
        commit_hash: commit.commit_hash.clone(),
        commit_message: commit.commit_message.clone(),
        classifications,
    })
}

/// Classifies every commit in a PR. Executed sequentially, one LLM call per
/// commit (spec §5: "classification per commit... executed sequentially").
#[instrument(skip_all, fields(commits = commits.len()))]
pub async fn classify_commits(
    gateway: &LlmGateway,
    commits: &[CommitInput],
) -> Result<Vec<CommitClassification>, ChangeClassifyError> {
    let mut out = Vec::with_capacity(commits.len());
    for commit in commits {
        out.push(classify_commit(gateway, commit).await?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiffStatus;

    #[tokio::test]
    async fn empty_commit_yields_no_classifications() {
        let cfg = llm_gateway::LlmModelConfig {
            provider: llm_gateway::LlmProvider::Ollama,
            model: "test".to_string(),
            endpoint: "http://127.0.0.1:1".to_string(),
            timeout_secs: Some(1),
            top_p: None,
            max_tokens: None,
        };
        let gateway = LlmGateway::new(cfg).unwrap();
        let commit = CommitInput {
            commit_hash: "abc123".to_string(),
            commit_message: "empty".to_string(),
            diffs: Vec::new(),
        };
        let result = classify_commit(&gateway, &commit).await.unwrap();
        assert!(result.classifications.is_empty());
        assert_eq!(result.commit_hash, "abc123");
    }

    #[test]
    fn diff_status_maps_onto_change_type() {
        use crate::model::ChangeType;
        assert_eq!(ChangeType::from(DiffStatus::Renamed), ChangeType::Rename);
        assert_eq!(ChangeType::from(DiffStatus::Added), ChangeType::Addition);
    }
}
