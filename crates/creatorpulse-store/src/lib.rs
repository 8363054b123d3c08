//! Read-only store over the collector's local-first creator snapshots.
//!
//! The (out-of-scope) collection pipeline writes one JSON file per
//! creator into a data directory. This crate loads that directory into
//! an in-memory, creator-keyed map at startup. Nothing here ever writes
//! back; within a request the data is immutable.

mod snapshot;
mod store;

use thiserror::Error;

pub use snapshot::{ProfileData, RawCreatorRecord};
pub use store::SnapshotStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read snapshot directory {path}: {source}")]
    DataDirIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
