//! Error types shared by the colony engine.

use thiserror::Error;

/// Boxed error raised by a problem collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the bee colony engine.
///
/// Only two things can abort a run: a configuration that cannot form a
/// colony, and a failure inside the problem collaborator. Flat landscapes
/// and infeasible candidates are handled internally and never surface here.
#[derive(Debug, Error)]
pub enum AbcError {
    /// The configuration was rejected before the loop started.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Candidate generation or perturbation failed.
    #[error("problem failure: {source}")]
    Problem {
        #[source]
        source: BoxError,
    },
}

impl AbcError {
    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Wrap a collaborator error.
    pub fn problem<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Problem {
            source: Box::new(source),
        }
    }
}

/// Result alias for colony operations.
pub type Result<T> = std::result::Result<T, AbcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("catalog is broken")]
    struct Broken;

    #[test]
    fn test_invalid_config_message() {
        let err = AbcError::invalid_config("max_generations must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: max_generations must be at least 1"
        );
    }

    #[test]
    fn test_problem_keeps_source() {
        let err = AbcError::problem(Broken);
        assert_eq!(err.to_string(), "problem failure: catalog is broken");
        assert!(std::error::Error::source(&err).is_some());
    }
}
