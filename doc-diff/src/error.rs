use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocDiffError {
    #[error("doc diff LLM call failed: {0}")]
    Llm(#[from] llm_gateway::GatewayError),
}

impl From<DocDiffError> for trace_model::PipelineError {
    fn from(err: DocDiffError) -> Self {
        match err {
            DocDiffError::Llm(e) => trace_model::PipelineError::LlmBadOutput {
                task: "doc_diff".to_string(),
                reason: e.to_string(),
            },
        }
    }
}
