//! Top-level error type for a `sort` call.

use thiserror::Error;

use qsort_core::CoreError;

#[derive(Error, Debug)]
pub enum SortError {
    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("sort was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, SortError>;
