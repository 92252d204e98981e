//! Projection store error types.

use thiserror::Error;

/// Errors that can occur when reading or updating the materialized view.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The requested signal does not exist in the view.
    ///
    /// Distinct from transport failures so the API can answer 404 instead
    /// of 500.
    #[error("signal not found")]
    NotFound,

    /// A store-layer error occurred.
    #[error("store error: {0}")]
    Store(#[from] redis::RedisError),
}

impl ProjectionError {
    /// Whether this error is the not-found sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProjectionError::NotFound)
    }
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
