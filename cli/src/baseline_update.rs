//! Core B orchestration: diffs the stored baseline's last-synced commit
//! against a new one and runs the incremental relinker over what changed.

use doc_diff::FileChangeStatus;
use graph_store::GraphStore;
use llm_gateway::LlmGateway;
use relink::{ChangedCodeFile, ChangedDocument};
use tracing::{info, instrument, warn};
use trace_model::ProcessingStats;

use crate::config::Settings;
use crate::error::CliError;
use crate::github::GitHubClient;

fn file_change_status(github_status: &str) -> FileChangeStatus {
    match github_status {
        "added" => FileChangeStatus::Added,
        "removed" => FileChangeStatus::Deleted,
        // Renames aren't tracked as a distinct move (the old path isn't
        // carried), so they're treated as an in-place modification of the
        // new path — a known gap, not a silent mismodeling of "added".
        "modified" | "renamed" | "changed" => FileChangeStatus::Modified,
        other => {
            warn!(status = other, "unrecognized GitHub file status, treating as modified");
            FileChangeStatus::Modified
        }
    }
}

#[instrument(skip(settings), fields(%repository, %branch, %commit_sha))]
pub async fn run(
    settings: &Settings,
    repository: String,
    branch: String,
    commit_sha: String,
) -> Result<ProcessingStats, CliError> {
    let store = GraphStore::new(settings.store_root.clone());
    let Some(mut map) = store.get(&repository, &branch).await? else {
        info!("no baseline recorded, nothing to update");
        return Ok(ProcessingStats::new());
    };

    let Some(base_sha) = map.last_synced_commit_sha.clone() else {
        return Err(CliError::Git(
            "baseline has no recorded commit to diff against; recreate it with baseline-create".to_string(),
        ));
    };
    if base_sha == commit_sha {
        info!("already synced to this commit, nothing to update");
        return Ok(ProcessingStats::new());
    }

    let (owner, repo) = repository
        .split_once('/')
        .ok_or_else(|| CliError::InvalidRepository(repository.clone()))?;

    let github = GitHubClient::new(settings.github_token.clone())?;
    let changed_files = github.compare(owner, repo, &base_sha, &commit_sha).await?;

    let mut changed_documents = Vec::new();
    let mut changed_code_files = Vec::new();

    for file in &changed_files {
        let status = file_change_status(&file.status);
        if doc_extract::classify(&file.filename).is_some() {
            let old_content = if matches!(status, FileChangeStatus::Added) {
                None
            } else {
                github.file_content(owner, repo, &file.filename, &base_sha).await?
            };
            let new_content = if matches!(status, FileChangeStatus::Deleted) {
                None
            } else {
                github.file_content(owner, repo, &file.filename, &commit_sha).await?
            };
            changed_documents.push(ChangedDocument {
                file_path: file.filename.clone(),
                status,
                old_content,
                new_content,
            });
        } else {
            changed_code_files.push(ChangedCodeFile { path: file.filename.clone(), status });
        }
    }

    let gateway = LlmGateway::new(settings.gateway_config.clone())?;
    let checkout = crate::gitclone::clone_at(owner, repo, &commit_sha, settings.github_token.as_deref()).await?;
    let sdd_content = read_sdd_content(&checkout).await;

    let result = relink::run(
        &gateway,
        &store,
        &mut map,
        &checkout,
        &changed_documents,
        &changed_code_files,
        &sdd_content,
        settings.scan_timeout,
        settings.concurrency,
        Some(&commit_sha),
    )
    .await;

    crate::gitclone::cleanup(&checkout);

    let stats = result?;
    info!(
        edges_created = stats.edges_created,
        edges_removed = stats.edges_removed,
        batches_failed = stats.batches_failed,
        "baseline updated"
    );
    Ok(stats)
}

/// Concatenates every SDD document found in the fresh checkout, for use as
/// R->D classification context (same role `sdd_content` plays in
/// `baseline-create`).
async fn read_sdd_content(checkout: &std::path::Path) -> String {
    let files = match repo_snapshot::snapshot(checkout, std::time::Duration::from_secs(30)).await {
        Ok(files) => files,
        Err(err) => {
            warn!(error = %err, "failed to re-scan checkout for SDD content");
            return String::new();
        }
    };

    let mut combined = String::new();
    for file in files {
        if doc_extract::classify(&file.path) == Some(doc_extract::DocumentKind::Sdd) {
            if let Some(content) = file.content {
                combined.push_str(&content);
                combined.push('\n');
            }
        }
    }
    combined
}
