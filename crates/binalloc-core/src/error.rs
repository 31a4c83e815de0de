//! Error types for allocation rounds

use thiserror::Error;

/// Why an allocation round produced no placement.
///
/// Every variant is all-or-nothing: no partial placement is returned and the
/// previous placement is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocateError {
    /// The assembled model failed structural validation.
    #[error("invalid model: {}", .0.join("; "))]
    InvalidModel(Vec<String>),

    /// No assignment satisfies the enabled hard constraints.
    #[error("no placement satisfies the enabled constraints")]
    Infeasible,

    /// The solver stopped without proving optimality.
    #[error("solver stopped without proving optimality")]
    NotOptimal,

    /// Even distribution was requested over an empty bin set.
    #[error("even distribution requires at least one bin")]
    EmptyBins,
}

impl AllocateError {
    /// Returns true when retrying with a larger solver budget may succeed.
    ///
    /// Infeasible rounds need relaxed options instead.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AllocateError::NotOptimal)
    }
}

/// Result type alias for allocation operations
pub type Result<T> = std::result::Result<T, AllocateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_not_optimal_is_retryable() {
        assert!(AllocateError::NotOptimal.is_retryable());
        assert!(!AllocateError::Infeasible.is_retryable());
        assert!(!AllocateError::EmptyBins.is_retryable());
        assert!(!AllocateError::InvalidModel(vec![]).is_retryable());
    }

    #[test]
    fn test_invalid_model_lists_diagnostics() {
        let err = AllocateError::InvalidModel(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid model: a; b");
    }
}
