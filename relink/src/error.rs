use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelinkError {
    #[error("code inventory rescan failed: {0}")]
    Scan(#[from] repo_snapshot::SnapshotError),
    #[error("doc diff failed: {0}")]
    DocDiff(#[from] doc_diff::DocDiffError),
    #[error("link classification failed: {0}")]
    LinkClassify(#[from] link_classify::LinkClassifyError),
    #[error("graph validation failed: {0}")]
    Validation(#[from] trace_model::ModelError),
    #[error("graph store error: {0}")]
    Store(#[from] graph_store::StoreError),
    #[error("malformed reconciliation data: {0}")]
    MalformedChange(String),
}

impl From<RelinkError> for trace_model::PipelineError {
    fn from(err: RelinkError) -> Self {
        match err {
            RelinkError::Scan(e) => trace_model::PipelineError::ScanFailed(e.to_string()),
            RelinkError::DocDiff(e) => e.into(),
            RelinkError::LinkClassify(e) => e.into(),
            RelinkError::Validation(e) => trace_model::PipelineError::ValidationFailed(e.to_string()),
            RelinkError::Store(graph_store::StoreError::Conflict { repository, branch }) => {
                trace_model::PipelineError::GraphConflict(format!("{repository}@{branch}"))
            }
            RelinkError::Store(e) => trace_model::PipelineError::GraphBackend(e.to_string()),
            RelinkError::MalformedChange(reason) => trace_model::PipelineError::LlmBadOutput {
                task: "relink".to_string(),
                reason,
            },
        }
    }
}
