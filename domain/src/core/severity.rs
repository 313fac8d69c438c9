//! Severity value object
//!
//! The ordered severity scale shared by findings, conflicts, and resolutions.
//! The ordering is load-bearing: issue ranking multiplies the severity rank
//! by confidence, and conflict detection fires only when two severities
//! differ.

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Severity of a reported finding (Value Object)
///
/// Ordered: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severity levels, lowest first
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Numeric rank used for issue weighting (`low=1` .. `critical=4`)
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    /// Get the string identifier for this severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = DomainError;

    /// Strict parse. Unknown levels are rejected rather than defaulted:
    /// a guessed severity would silently bias the consensus weighting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(DomainError::UnknownSeverity(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_rank() {
        assert_eq!(Severity::Low.rank(), 1);
        assert_eq!(Severity::Medium.rank(), 2);
        assert_eq!(Severity::High.rank(), 3);
        assert_eq!(Severity::Critical.rank(), 4);
    }

    #[test]
    fn test_severity_roundtrip() {
        for severity in Severity::ALL {
            let parsed: Severity = severity.as_str().parse().unwrap();
            assert_eq!(severity, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let parsed: Severity = "  CRITICAL ".parse().unwrap();
        assert_eq!(parsed, Severity::Critical);
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let result: Result<Severity, _> = "severe".parse();
        assert!(matches!(result, Err(DomainError::UnknownSeverity(_))));
    }
}
