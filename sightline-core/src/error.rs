//! Error types for the sighting geometry engine
//!
//! Every failure is synchronous and propagates straight to the caller.
//! Nothing in this crate retries or substitutes a fallback value; that
//! policy belongs to whoever drives the computation.

use thiserror::Error;

/// Failure kinds produced by the geometry engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// An input value was missing, empty or not finite
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The reference geometry is empty, degenerate or of the wrong dimension
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The nearest-point search could not produce a result
    #[error("operation failed: {0}")]
    OperationFailed(String),
}

impl GeometryError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        GeometryError::InvalidArgument(reason.into())
    }

    pub(crate) fn invalid_geometry(reason: impl Into<String>) -> Self {
        GeometryError::InvalidGeometry(reason.into())
    }

    pub(crate) fn operation_failed(reason: impl Into<String>) -> Self {
        GeometryError::OperationFailed(reason.into())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Reject a non-finite scalar with [`GeometryError::InvalidArgument`]
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::invalid_argument(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}
