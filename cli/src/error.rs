//! Top-level CLI failure type: every pipeline crate's error folds in here,
//! and this is what maps to a process exit code (spec §6/§7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] llm_gateway::ConfigError),

    #[error("LLM gateway error: {0}")]
    Gateway(#[from] llm_gateway::GatewayError),

    #[error("missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("invalid pull request URL: {0}")]
    InvalidPrUrl(String),

    #[error("invalid repository `{0}`: expected `owner/repo`")]
    InvalidRepository(String),

    #[error("git operation failed: {0}")]
    Git(String),

    #[error("GitHub API error: {0}")]
    GitHub(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("document extraction failed: {0}")]
    Extract(#[from] doc_extract::ExtractError),

    #[error("graph validation failed: {0}")]
    Validation(#[from] trace_model::ModelError),

    #[error("link classification failed: {0}")]
    LinkClassify(#[from] link_classify::LinkClassifyError),

    #[error("graph store error: {0}")]
    Store(#[from] graph_store::StoreError),

    #[error("repository scan failed: {0}")]
    Scan(#[from] repo_snapshot::SnapshotError),

    #[error("incremental relink failed: {0}")]
    Relink(#[from] relink::RelinkError),

    #[error("change classification failed: {0}")]
    ChangeClassify(#[from] change_classify::ChangeClassifyError),

    #[error("change grouping failed: {0}")]
    ChangeGroup(#[from] change_group::ChangeGroupError),

    #[error("impact tracing failed: {0}")]
    ImpactTrace(#[from] impact_trace::ImpactTraceError),

    #[error("recommendation generation failed: {0}")]
    Recommend(#[from] recommend::RecommendError),

    #[error("no baseline map recorded for {repository}@{branch}; run baseline-create first")]
    NoBaseline { repository: String, branch: String },

    #[error("baseline map already exists for {repository}@{branch}; pass --force to recreate it")]
    BaselineExists { repository: String, branch: String },
}
