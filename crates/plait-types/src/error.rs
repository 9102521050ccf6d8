//! Error types for the plait simulator.
//!
//! All crates return `PlaitResult<T>` from fallible operations. Force
//! evaluation itself is infallible; only construction and configuration
//! entry points report errors.

use thiserror::Error;

/// Unified error type for the plait simulator.
#[derive(Debug, Error)]
pub enum PlaitError {
    /// Strand geometry is malformed (too few vertices, degenerate edges).
    #[error("Invalid strand: {0}")]
    InvalidStrand(String),

    /// Material parameter is out of valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A buffer handed to the force model has the wrong length.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
    },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sparse triplets could not be assembled into a matrix.
    #[error("Sparse assembly error: {0}")]
    Assembly(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, PlaitError>`.
pub type PlaitResult<T> = Result<T, PlaitError>;
