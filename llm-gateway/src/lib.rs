//! Typed LLM access for every extraction/classification/reconciliation
//! call the three pipelines make.
//!
//! A [`LlmGateway`] wraps one Ollama model endpoint and exposes a single
//! `generate::<T>` entry point: `T`'s `Deserialize` impl stands in for the
//! JSON schema the spec describes, validated by retrying on parse failure
//! rather than by hand-checking a schema document.

pub mod config;
pub mod error;
pub mod gateway;
pub mod ollama;
pub mod task;

pub use config::{ConfigError, LlmModelConfig, LlmProvider};
pub use error::GatewayError;
pub use gateway::LlmGateway;
pub use task::TaskType;
