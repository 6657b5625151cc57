//! Storage is organized through [tracker_store::TrackerStore].
//! The basic idea is:
//!  - All trackers live in a single JSON file, keyed by their label.
//!  - The whole file is read on start and rewritten after every change.
//!  - Progress is stored sparsely, only cells that were touched are written.

use std::path::PathBuf;

pub mod entities;
pub mod tracker_store;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file exists but can't be parsed. Nothing tries to repair it.
    #[error("Tracker data in {} is malformed: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode tracker data: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("No tracker found for {0}")]
    NotFound(String),
}
