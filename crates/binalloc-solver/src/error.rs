//! Why a backend returned no usable answer.

use thiserror::Error;

/// Failure detail attached to an [`Unknown`](crate::SolveStatus::Unknown) result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The model failed structural validation and was not handed to the backend.
    #[error("model rejected: {0}")]
    Rejected(String),

    /// The backend stopped with an error of its own.
    #[error("{backend} failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },
}
