//! Core A.2: D<->D, R<->D, and D<->C link proposal, with hard vocabulary
//! validation applied before anything reaches the graph store.

pub mod apply;
pub mod dc;
pub mod dd;
pub mod error;
pub mod model;
pub mod rd;

pub use apply::apply_proposed_edges;
pub use dc::{classify_dc, classify_dc_candidates};
pub use dd::{classify_dd, classify_dd_candidates};
pub use error::LinkClassifyError;
pub use model::{ProposedEdge, ProposedEdges};
pub use rd::{classify_rd, classify_rd_candidates};
