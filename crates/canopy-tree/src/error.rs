//! Error types for the tree loader.

use thiserror::Error;

/// Errors from a remote resource listing.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The remote listing call failed.
    #[error("remote listing failed: {0}")]
    Remote(#[from] anyhow::Error),

    /// The continuation cursor was rejected by the remote.
    #[error("invalid continuation cursor: {0}")]
    InvalidCursor(String),
}

/// Errors constructing a single tree node from a raw item.
///
/// Construction failures are isolated per item and never abort a page
/// load; they surface as placeholder nodes instead.
#[derive(Error, Debug)]
pub enum NodeError {
    /// The raw item could not be turned into a node.
    #[error("failed to construct node: {0}")]
    Construction(String),

    /// The raw item's payload could not be deserialized.
    #[error("failed to deserialize item payload: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Errors that abort a page load.
#[derive(Error, Debug)]
pub enum TreeError {
    /// The source fetch for the page failed.
    #[error("failed to load children: {0}")]
    Source(#[from] SourceError),
}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
