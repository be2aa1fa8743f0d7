use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkClassifyError {
    #[error("link classification LLM call failed: {0}")]
    Llm(#[from] llm_gateway::GatewayError),

    /// A proposed edge failed hard validation (unknown endpoint or
    /// out-of-vocabulary relationship type). Per spec §4.5 this raises
    /// rather than being logged and skipped.
    #[error("rejected proposed edge: {0}")]
    Validation(#[from] trace_model::ModelError),
}

impl From<LinkClassifyError> for trace_model::PipelineError {
    fn from(err: LinkClassifyError) -> Self {
        match err {
            LinkClassifyError::Llm(e) => trace_model::PipelineError::LlmBadOutput {
                task: "link_classification".to_string(),
                reason: e.to_string(),
            },
            LinkClassifyError::Validation(e) => trace_model::PipelineError::ValidationFailed(e.to_string()),
        }
    }
}
