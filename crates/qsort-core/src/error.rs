//! Core error types for the tournament engine

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("items must not be empty")]
    EmptyItems,

    #[error("duplicate item: {0:?}")]
    DuplicateItem(String),

    #[error("elimination_count must be >= 1, got {0}")]
    InvalidEliminationCount(u32),

    #[error("comparison_rounds must be >= 1, got {0}")]
    InvalidComparisonRounds(u32),

    #[error("max_concurrent_requests must be >= 1, got {0}")]
    InvalidConcurrency(u32),

    #[error("criteria must not be empty")]
    EmptyCriteria,

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}
