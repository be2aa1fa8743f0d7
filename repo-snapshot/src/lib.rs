//! Timeout-bounded `path -> content` snapshots of a checked-out repository.

pub mod error;
pub mod ignore;
pub mod snapshot;

pub use error::SnapshotError;
pub use snapshot::{snapshot, SnapshotFile};
