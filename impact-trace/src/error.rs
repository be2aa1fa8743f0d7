use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImpactTraceError {
    #[error("impact scoring LLM call failed: {0}")]
    Llm(#[from] llm_gateway::GatewayError),

    /// The model's scored-findings array did not preserve the input's
    /// length — the order/length-preservation contract in spec §4.10 was
    /// broken even though the response parsed as valid JSON.
    #[error("impact scoring returned {actual} scores for {expected} findings")]
    LengthMismatch { expected: usize, actual: usize },
}

impl From<ImpactTraceError> for trace_model::PipelineError {
    fn from(err: ImpactTraceError) -> Self {
        match err {
            ImpactTraceError::Llm(e) => trace_model::PipelineError::LlmBadOutput {
                task: "impact_scoring".to_string(),
                reason: e.to_string(),
            },
            ImpactTraceError::LengthMismatch { expected, actual } => {
                trace_model::PipelineError::LlmBadOutput {
                    task: "impact_scoring".to_string(),
                    reason: format!("expected {expected} scores, got {actual}"),
                }
            }
        }
    }
}
