//! Persistence for the baseline traceability map.
//!
//! One [`TraceMap`](trace_model::TraceMap) per `(repository, branch)`,
//! always read and written as a whole (spec §4.1: "no partial projection").

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::GraphStore;
