//! Error types for minipart

use thiserror::Error;

/// Main error type for partitioning operations
#[derive(Debug, Error)]
pub enum PartitionError {
    /// Malformed input file
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Invalid problem setup (dimension mismatch, non-positive block count)
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Derived state drifted from a from-scratch recomputation
    #[error("internal inconsistency: {0}")]
    Inconsistency(String),

    /// Coarsening or uncoarsening precondition violated
    #[error("unrepresentable coarsening: {0}")]
    Unrepresentable(String),

    /// Underlying IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartitionError {
    /// Shorthand for a parse error with line context.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        PartitionError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for partitioning operations
pub type Result<T> = std::result::Result<T, PartitionError>;
