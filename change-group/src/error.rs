use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangeGroupError {
    #[error("change grouping LLM call failed: {0}")]
    Llm(#[from] llm_gateway::GatewayError),
}

impl From<ChangeGroupError> for trace_model::PipelineError {
    fn from(err: ChangeGroupError) -> Self {
        match err {
            ChangeGroupError::Llm(e) => trace_model::PipelineError::LlmBadOutput {
                task: "change_grouping".to_string(),
                reason: e.to_string(),
            },
        }
    }
}
