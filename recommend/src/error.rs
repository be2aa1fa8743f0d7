use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("recommendation generation LLM call failed: {0}")]
    Llm(#[from] llm_gateway::GatewayError),
}

impl From<RecommendError> for trace_model::PipelineError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::Llm(e) => trace_model::PipelineError::LlmBadOutput {
                task: "recommendation".to_string(),
                reason: e.to_string(),
            },
        }
    }
}
