//! Core C.4: filters scored findings, groups by target document, and
//! generates documentation-update recommendations.

pub mod dedup;
pub mod error;
pub mod filter;
pub mod group;
pub mod model;
pub mod pipeline;
pub mod suggest;

pub use error::RecommendError;
pub use group::{group_by_document, GroupedFindings};
pub use model::{DocumentSummary, Recommendation, RecommendationType, UNMAPPED_TARGET_DOCUMENT};
pub use pipeline::recommend;
