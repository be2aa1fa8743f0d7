use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangeClassifyError {
    #[error("change classification LLM call failed: {0}")]
    Llm(#[from] llm_gateway::GatewayError),
}

impl From<ChangeClassifyError> for trace_model::PipelineError {
    fn from(err: ChangeClassifyError) -> Self {
        match err {
            ChangeClassifyError::Llm(e) => trace_model::PipelineError::LlmBadOutput {
                task: "change_classification".to_string(),
                reason: e.to_string(),
            },
        }
    }
}
