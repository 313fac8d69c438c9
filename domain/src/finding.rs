//! Finding types - one analyzer's validated output
//!
//! A [`Finding`] is a single reported issue or strength; an [`Analysis`] is
//! the full validated output of one analyzer for one run (findings plus a
//! 0-100 self-score used later for report grading). Both are read-only after
//! Phase 1.

use crate::core::error::DomainError;
use crate::core::severity::Severity;
use serde::{Deserialize, Serialize};

/// One reported issue or strength from a single analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Role name of the analyzer that produced this finding
    pub analyzer: String,
    /// Expertise area the finding falls under
    pub category: String,
    /// What the analyzer observed
    pub description: String,
    /// How severe the issue is
    pub severity: Severity,
    /// Analyzer's confidence in the finding (0.0 to 1.0)
    pub confidence: f64,
    /// Supporting evidence from the document
    pub evidence: String,
    /// Suggested fix
    pub recommendation: String,
    /// Why the issue matters
    pub impact: String,
}

impl Finding {
    /// Create a finding, validating the confidence range
    pub fn new(
        analyzer: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        confidence: f64,
    ) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::ConfidenceOutOfRange(confidence));
        }

        Ok(Self {
            analyzer: analyzer.into(),
            category: category.into(),
            description: description.into(),
            severity,
            confidence,
            evidence: String::new(),
            recommendation: String::new(),
            impact: String::new(),
        })
    }

    /// Attach supporting evidence
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }

    /// Attach a suggested fix
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }

    /// Attach an impact statement
    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = impact.into();
        self
    }

    /// Identity key for dedup bookkeeping: the same analyzer never reports
    /// the same description twice within one run.
    pub fn key(&self) -> (&str, &str) {
        (&self.analyzer, &self.description)
    }
}

/// Validated output of one analyzer for one review run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Role name of the analyzer
    pub analyzer: String,
    /// Self-reported overall score for the document (0-100)
    pub score: f64,
    /// Findings, in the order the analyzer reported them
    pub findings: Vec<Finding>,
}

impl Analysis {
    /// Create an analysis, validating the score range
    pub fn new(
        analyzer: impl Into<String>,
        score: f64,
        findings: Vec<Finding>,
    ) -> Result<Self, DomainError> {
        if !(0.0..=100.0).contains(&score) {
            return Err(DomainError::ScoreOutOfRange(score));
        }

        Ok(Self {
            analyzer: analyzer.into(),
            score,
            findings,
        })
    }

    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }
}
