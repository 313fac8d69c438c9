//! Analyzer roster - immutable configuration for the review council
//!
//! Analyzers are process-wide, read-only configuration: the roster is built
//! once (from config or the built-in default) and injected into every review
//! run. Nothing mutates an `AnalyzerSpec` after construction, which is what
//! makes concurrent runs against the same roster safe.

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One expert analyzer in the council (immutable configuration)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerSpec {
    /// Unique role name (e.g. "brand-compliance")
    name: String,
    /// Expertise areas this analyzer covers
    expertise: Vec<String>,
    /// Relative authority in synthesis. Must be positive.
    weight: f64,
    /// Reasoning model backing this analyzer
    model: Model,
}

impl AnalyzerSpec {
    /// Create a new analyzer with weight 1.0 and no expertise tags
    pub fn new(name: impl Into<String>, model: Model) -> Self {
        Self {
            name: name.into(),
            expertise: Vec::new(),
            weight: 1.0,
            model,
        }
    }

    /// Set the expertise tags
    pub fn with_expertise<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expertise = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the authority weight. Validated when the roster is assembled.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expertise(&self) -> &[String] {
        &self.expertise
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Comma-joined expertise tags for prompt construction
    pub fn focus(&self) -> String {
        if self.expertise.is_empty() {
            "general document quality".to_string()
        } else {
            self.expertise.join(", ")
        }
    }
}

impl std::fmt::Display for AnalyzerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (x{})", self.name, self.weight)
    }
}

/// The full council roster (immutable once constructed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    analyzers: Vec<AnalyzerSpec>,
}

impl Roster {
    /// Assemble a roster, enforcing the invariants: non-empty, unique names,
    /// positive weights.
    pub fn new(analyzers: Vec<AnalyzerSpec>) -> Result<Self, DomainError> {
        if analyzers.is_empty() {
            return Err(DomainError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for analyzer in &analyzers {
            if !seen.insert(analyzer.name().to_string()) {
                return Err(DomainError::DuplicateAnalyzer(analyzer.name().to_string()));
            }
            if analyzer.weight() <= 0.0 || !analyzer.weight().is_finite() {
                return Err(DomainError::NonPositiveWeight(analyzer.weight()));
            }
        }

        Ok(Self { analyzers })
    }

    /// The built-in council, mirroring the expert roles the pipeline was
    /// designed around. Used when no roster is configured.
    pub fn default_roster() -> Self {
        let analyzers = vec![
            AnalyzerSpec::new("brand-compliance", Model::ClaudeSonnet45)
                .with_expertise(["brand colors", "typography", "logo usage"])
                .with_weight(1.5),
            AnalyzerSpec::new("layout-quality", Model::Gpt52)
                .with_expertise(["grid alignment", "spacing", "visual hierarchy"]),
            AnalyzerSpec::new("accessibility", Model::ClaudeSonnet45)
                .with_expertise(["contrast", "reading order", "alt text"])
                .with_weight(1.2),
            AnalyzerSpec::new("content-quality", Model::Gemini3Pro)
                .with_expertise(["tone", "clarity", "audience fit"]),
        ];

        // The built-in roster always satisfies the invariants
        Self { analyzers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalyzerSpec> {
        self.analyzers.iter()
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Look up an analyzer by role name
    pub fn get(&self, name: &str) -> Option<&AnalyzerSpec> {
        self.analyzers.iter().find(|a| a.name() == name)
    }

    /// Sum of all authority weights
    pub fn total_weight(&self) -> f64 {
        self.analyzers.iter().map(|a| a.weight()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_defaults() {
        let analyzer = AnalyzerSpec::new("layout-quality", Model::default());
        assert_eq!(analyzer.weight(), 1.0);
        assert_eq!(analyzer.focus(), "general document quality");
    }

    #[test]
    fn test_analyzer_focus_joins_tags() {
        let analyzer =
            AnalyzerSpec::new("brand-compliance", Model::default()).with_expertise(["colors", "fonts"]);
        assert_eq!(analyzer.focus(), "colors, fonts");
    }

    #[test]
    fn test_roster_rejects_empty() {
        assert!(matches!(Roster::new(vec![]), Err(DomainError::EmptyRoster)));
    }

    #[test]
    fn test_roster_rejects_duplicate_names() {
        let result = Roster::new(vec![
            AnalyzerSpec::new("layout", Model::default()),
            AnalyzerSpec::new("layout", Model::default()),
        ]);
        assert!(matches!(result, Err(DomainError::DuplicateAnalyzer(_))));
    }

    #[test]
    fn test_roster_rejects_non_positive_weight() {
        let result = Roster::new(vec![
            AnalyzerSpec::new("layout", Model::default()).with_weight(0.0),
        ]);
        assert!(matches!(result, Err(DomainError::NonPositiveWeight(_))));

        let result = Roster::new(vec![
            AnalyzerSpec::new("layout", Model::default()).with_weight(-2.0),
        ]);
        assert!(matches!(result, Err(DomainError::NonPositiveWeight(_))));
    }

    #[test]
    fn test_default_roster_is_valid() {
        let roster = Roster::default_roster();
        assert!(!roster.is_empty());
        assert!(Roster::new(roster.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn test_roster_lookup_and_weight() {
        let roster = Roster::default_roster();
        assert!(roster.get("brand-compliance").is_some());
        assert!(roster.get("nonexistent").is_none());
        assert!(roster.total_weight() > roster.len() as f64 - 1.0);
    }
}
