use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document `{0}` is empty or unreadable")]
    InputMissing(String),

    #[error("extraction LLM call failed: {0}")]
    Llm(#[from] llm_gateway::GatewayError),
}

impl From<ExtractError> for trace_model::PipelineError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::InputMissing(path) => trace_model::PipelineError::InputMissing(path),
            ExtractError::Llm(e) => trace_model::PipelineError::LlmBadOutput {
                task: "extraction".to_string(),
                reason: e.to_string(),
            },
        }
    }
}
