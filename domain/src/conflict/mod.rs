//! Conflict and resolution types
//!
//! A [`Conflict`] pairs two findings from different analyzers that describe
//! the same underlying issue with differing severities. A [`Resolution`] is
//! the outcome of one debate over one conflict: a winning severity, a
//! consolidated description, and the arbiter's rationale.

pub mod detector;

use crate::core::error::DomainError;
use crate::core::severity::Severity;
use crate::finding::Finding;
use serde::{Deserialize, Serialize};

/// Two findings judged to describe the same issue with differing severities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Finding from the first analyzer
    pub first: Finding,
    /// Finding from the second analyzer
    pub second: Finding,
    /// Tokens shared between the two descriptions (audit trail)
    pub shared_tokens: Vec<String>,
}

impl Conflict {
    /// Pair two findings into a conflict.
    ///
    /// # Panics
    /// Panics if the findings come from the same analyzer or carry the same
    /// severity; only disagreements between analyzers are conflicts.
    pub fn new(first: Finding, second: Finding, shared_tokens: Vec<String>) -> Self {
        assert_ne!(
            first.analyzer, second.analyzer,
            "a conflict needs two different analyzers"
        );
        assert_ne!(
            first.severity, second.severity,
            "a conflict needs differing severities"
        );
        Self {
            first,
            second,
            shared_tokens,
        }
    }

    /// Names of the two disagreeing analyzers
    pub fn analyzers(&self) -> (&str, &str) {
        (&self.first.analyzer, &self.second.analyzer)
    }

    /// One-line summary for logs and progress output
    pub fn summary(&self) -> String {
        format!(
            "{} ({}) vs {} ({})",
            self.first.analyzer, self.first.severity, self.second.analyzer, self.second.severity
        )
    }
}

/// The consolidated outcome of one debate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// The conflict this resolution settles
    pub conflict: Conflict,
    /// Severity the arbiter decided on
    pub severity: Severity,
    /// Single consolidated description replacing both findings
    pub description: String,
    /// Arbiter's confidence in the decision (0.0 to 1.0)
    pub confidence: f64,
    /// Why the arbiter decided this way
    pub rationale: String,
}

impl Resolution {
    /// Create a resolution, validating the confidence range
    pub fn new(
        conflict: Conflict,
        severity: Severity,
        description: impl Into<String>,
        confidence: f64,
        rationale: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::ConfidenceOutOfRange(confidence));
        }

        Ok(Self {
            conflict,
            severity,
            description: description.into(),
            confidence,
            rationale: rationale.into(),
        })
    }

    /// Whether this debate ended decisively enough to count toward consensus
    pub fn is_decisive(&self, threshold: f64) -> bool {
        self.confidence > threshold
    }

    /// Recommendation carried into the final report: the one attached to the
    /// finding whose severity won the debate, falling back to the other side.
    pub fn recommendation(&self) -> &str {
        let (winner, loser) = if self.conflict.second.severity == self.severity {
            (&self.conflict.second, &self.conflict.first)
        } else {
            (&self.conflict.first, &self.conflict.second)
        };

        if winner.recommendation.is_empty() {
            &loser.recommendation
        } else {
            &winner.recommendation
        }
    }
}
