//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown severity level: {0}")]
    UnknownSeverity(String),

    #[error("Confidence {0} is outside the 0.0-1.0 range")]
    ConfidenceOutOfRange(f64),

    #[error("Score {0} is outside the 0-100 range")]
    ScoreOutOfRange(f64),

    #[error("Analyzer weight must be positive, got {0}")]
    NonPositiveWeight(f64),

    #[error("Analyzer roster is empty")]
    EmptyRoster,

    #[error("Duplicate analyzer name: {0}")]
    DuplicateAnalyzer(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),
}

impl DomainError {
    /// Check if this error came from validating a backend response
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownSeverity(_)
                | DomainError::ConfidenceOutOfRange(_)
                | DomainError::ScoreOutOfRange(_)
                | DomainError::MalformedResponse(_)
        )
    }
}
