//! Engine Errors
//!
//! Only persistence failures are errors. Invalid transitions (dropping while
//! idle, dragging without edit rights) are silent no-ops.

use thiserror::Error;

/// Result type for persistence calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure reported by the remote persistence API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server rejected request ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Why a save did not commit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    /// At least one write failed; dirty markers are kept for a retry
    #[error("save failed: {0}")]
    Rejected(#[from] ApiError),
    /// The store was re-initialized or discarded while the batch was in flight
    #[error("save result arrived after the collection was reloaded")]
    Superseded,
}
