//! Failure kinds for index construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorSearchError {
    #[error("embedding call failed: {0}")]
    Embedding(#[from] llm_gateway::GatewayError),
}
