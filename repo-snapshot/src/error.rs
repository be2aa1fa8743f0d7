use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("repo snapshot failed: {0}")]
    ScanFailed(String),

    #[error("repo snapshot timed out after {0:?}")]
    Timeout(std::time::Duration),
}
