//! Core A.1: turns SDD/SRS Markdown into structured, unassigned-ID data
//! for the baseline builder to merge into a [`trace_model::TraceMap`].

pub mod discovery;
pub mod error;
pub mod markdown;
pub mod model;
pub mod sdd;
pub mod srs;

pub use discovery::{classify, DocumentKind};
pub use error::ExtractError;
pub use model::{ExtractedDesignElement, ExtractedRequirement, MatrixRow, SddExtraction, SrsExtraction};
pub use sdd::extract_sdd;
pub use srs::extract_srs;
