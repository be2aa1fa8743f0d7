//! Core C orchestration: classifies every commit on a pull request, groups
//! the classified changes, traces their impact against the stored
//! baseline, and generates documentation recommendations.

use change_classify::{CommitInput, DiffStatus, FileDiff};
use change_group::ClassifiedChange;
use graph_store::GraphStore;
use llm_gateway::LlmGateway;
use recommend::Recommendation;
use tracing::{info, instrument};

use crate::config::Settings;
use crate::error::CliError;
use crate::github::{self, GitHubClient};

fn diff_status(github_status: &str) -> DiffStatus {
    match github_status {
        "added" => DiffStatus::Added,
        "removed" => DiffStatus::Deleted,
        "renamed" => DiffStatus::Renamed,
        _ => DiffStatus::Modified,
    }
}

#[instrument(skip(settings), fields(%pr_url))]
pub async fn run(settings: &Settings, pr_url: String) -> Result<Vec<Recommendation>, CliError> {
    let (owner, repo, number) = github::parse_pr_url(&pr_url)?;
    let repository = format!("{owner}/{repo}");

    let gh = GitHubClient::new(settings.github_token.clone())?;
    let pr = gh.pull_request(&owner, &repo, number).await?;

    let store = GraphStore::new(settings.store_root.clone());
    let Some(map) = store.get(&repository, &pr.base_ref).await? else {
        return Err(CliError::NoBaseline { repository, branch: pr.base_ref });
    };

    let commits = gh.pull_request_commits(&owner, &repo, number).await?;
    let mut commit_inputs = Vec::with_capacity(commits.len());
    for commit in &commits {
        let files = gh.commit_files(&owner, &repo, &commit.sha).await?;
        let diffs: Vec<FileDiff> = files
            .into_iter()
            .map(|f| FileDiff {
                file_path: f.filename,
                status: diff_status(&f.status),
                patch: f.patch.unwrap_or_default(),
                added_lines: f.additions,
                deleted_lines: f.deletions,
            })
            .collect();
        commit_inputs.push(CommitInput {
            commit_hash: commit.sha.clone(),
            commit_message: commit.message.clone(),
            diffs,
        });
    }

    let gateway = LlmGateway::new(settings.gateway_config.clone())?;

    let classifications = change_classify::classify_commits(&gateway, &commit_inputs).await?;
    let classified_changes: Vec<ClassifiedChange> = classifications
        .into_iter()
        .flat_map(|c| {
            let commit_hash = c.commit_hash;
            let commit_message = c.commit_message;
            c.classifications.into_iter().map(move |classification| ClassifiedChange {
                commit_hash: commit_hash.clone(),
                commit_message: commit_message.clone(),
                classification,
            })
        })
        .collect();

    let change_sets = change_group::group_changes(&gateway, &classified_changes).await?;
    let findings = impact_trace::trace_and_score(&gateway, &map, &change_sets, settings.concurrency).await?;
    let recommendations = recommend::recommend(&gateway, findings, &[], settings.concurrency).await?;

    info!(
        commits = commit_inputs.len(),
        change_sets = change_sets.len(),
        recommendations = recommendations.len(),
        "pr analysis complete"
    );

    Ok(recommendations)
}
