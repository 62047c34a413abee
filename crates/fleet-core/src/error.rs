//! Fleet-core error type.
//!
//! Only the snapshot and file edges can fail.  Individual records never do:
//! malformed fields read as absent (see [`crate::record`]).

use thiserror::Error;

/// Errors produced by `fleet-core`.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `fleet-core`.
pub type FleetResult<T> = Result<T, FleetError>;
