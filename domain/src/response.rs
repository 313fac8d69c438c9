//! Backend response parsing and validation
//!
//! Reasoning backends return free-form text that should contain one JSON
//! object. These functions extract it and validate it into the strict domain
//! types at the boundary, so nothing unvalidated reaches the pipeline.
//! Malformed output is an error, never a default: a guessed severity or
//! clamped confidence would silently corrupt the consensus weighting.

use crate::conflict::{Conflict, Resolution};
use crate::core::error::DomainError;
use crate::core::severity::Severity;
use crate::finding::{Analysis, Finding};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawFinding {
    category: String,
    description: String,
    severity: String,
    confidence: f64,
    #[serde(default)]
    evidence: String,
    #[serde(default)]
    recommendation: String,
    #[serde(default)]
    impact: String,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    score: f64,
    #[serde(default)]
    findings: Vec<RawFinding>,
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    severity: String,
    description: String,
    confidence: f64,
    rationale: String,
}

/// The validated outcome of one debate, before it is bound to its conflict
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionVerdict {
    pub severity: Severity,
    pub description: String,
    pub confidence: f64,
    pub rationale: String,
}

/// Slice out the JSON object embedded in a response (models often wrap it in
/// prose or a markdown fence)
fn extract_json(response: &str) -> Result<&str, DomainError> {
    let start = response
        .find('{')
        .ok_or_else(|| DomainError::MalformedResponse("no JSON object in response".to_string()))?;
    let end = response[start..]
        .rfind('}')
        .ok_or_else(|| DomainError::MalformedResponse("unterminated JSON object".to_string()))?;
    Ok(&response[start..start + end + 1])
}

/// Parse and validate one analyzer's raw response into an [`Analysis`].
///
/// Rejects: missing/invalid JSON, out-of-range score, unknown severities,
/// out-of-range confidences.
pub fn parse_analysis_response(analyzer: &str, response: &str) -> Result<Analysis, DomainError> {
    let json = extract_json(response)?;
    let raw: RawAnalysis = serde_json::from_str(json)
        .map_err(|e| DomainError::MalformedResponse(format!("analysis response: {e}")))?;

    let mut findings = Vec::with_capacity(raw.findings.len());
    for raw_finding in raw.findings {
        let severity: Severity = raw_finding.severity.parse()?;
        let finding = Finding::new(
            analyzer,
            raw_finding.category,
            raw_finding.description,
            severity,
            raw_finding.confidence,
        )?
        .with_evidence(raw_finding.evidence)
        .with_recommendation(raw_finding.recommendation)
        .with_impact(raw_finding.impact);
        findings.push(finding);
    }

    Analysis::new(analyzer, raw.score, findings)
}

/// Parse and validate an arbiter's raw response into a [`Resolution`] bound
/// to the conflict it settles.
pub fn parse_resolution_response(
    conflict: Conflict,
    response: &str,
) -> Result<Resolution, DomainError> {
    let verdict = parse_verdict(response)?;
    Resolution::new(
        conflict,
        verdict.severity,
        verdict.description,
        verdict.confidence,
        verdict.rationale,
    )
}

fn parse_verdict(response: &str) -> Result<ResolutionVerdict, DomainError> {
    let json = extract_json(response)?;
    let raw: RawVerdict = serde_json::from_str(json)
        .map_err(|e| DomainError::MalformedResponse(format!("debate response: {e}")))?;

    let severity: Severity = raw.severity.parse()?;
    if !(0.0..=1.0).contains(&raw.confidence) {
        return Err(DomainError::ConfidenceOutOfRange(raw.confidence));
    }

    Ok(ResolutionVerdict {
        severity,
        description: raw.description,
        confidence: raw.confidence,
        rationale: raw.rationale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conflict() -> Conflict {
        let first =
            Finding::new("x", "layout", "logo too small on cover", Severity::Medium, 0.7).unwrap();
        let second =
            Finding::new("y", "brand", "logo size too small cover page", Severity::High, 0.8).unwrap();
        Conflict::new(first, second, vec!["logo".into(), "small".into()])
    }

    #[test]
    fn test_parse_analysis_happy_path() {
        let response = r#"Here is my assessment:
```json
{
  "score": 72,
  "findings": [
    {
      "category": "colors",
      "description": "Header uses off-brand teal",
      "severity": "medium",
      "confidence": 0.8,
      "evidence": "Header fill #1A7A6D",
      "recommendation": "Use palette teal",
      "impact": "Weakens brand recognition"
    }
  ]
}
```"#;

        let analysis = parse_analysis_response("brand-compliance", response).unwrap();
        assert_eq!(analysis.score, 72.0);
        assert_eq!(analysis.findings.len(), 1);
        assert_eq!(analysis.findings[0].analyzer, "brand-compliance");
        assert_eq!(analysis.findings[0].severity, Severity::Medium);
    }

    #[test]
    fn test_parse_analysis_empty_findings() {
        let analysis = parse_analysis_response("layout", r#"{"score": 95, "findings": []}"#).unwrap();
        assert!(analysis.findings.is_empty());
        assert_eq!(analysis.score, 95.0);
    }

    #[test]
    fn test_parse_analysis_rejects_missing_json() {
        let result = parse_analysis_response("layout", "The document looks fine to me.");
        assert!(matches!(result, Err(DomainError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_analysis_rejects_unknown_severity() {
        let response = r#"{"score": 80, "findings": [
            {"category": "c", "description": "d", "severity": "catastrophic", "confidence": 0.5}
        ]}"#;
        let result = parse_analysis_response("layout", response);
        assert!(matches!(result, Err(DomainError::UnknownSeverity(_))));
    }

    #[test]
    fn test_parse_analysis_rejects_bad_confidence() {
        let response = r#"{"score": 80, "findings": [
            {"category": "c", "description": "d", "severity": "low", "confidence": 1.2}
        ]}"#;
        let result = parse_analysis_response("layout", response);
        assert!(matches!(result, Err(DomainError::ConfidenceOutOfRange(_))));
    }

    #[test]
    fn test_parse_analysis_rejects_bad_score() {
        let result = parse_analysis_response("layout", r#"{"score": 140, "findings": []}"#);
        assert!(matches!(result, Err(DomainError::ScoreOutOfRange(_))));
    }

    #[test]
    fn test_parse_resolution_happy_path() {
        let response = r#"{
            "severity": "high",
            "description": "Cover logo is undersized",
            "confidence": 0.85,
            "rationale": "Measured size is below the minimum in the guidelines"
        }"#;

        let resolution = parse_resolution_response(conflict(), response).unwrap();
        assert_eq!(resolution.severity, Severity::High);
        assert_eq!(resolution.confidence, 0.85);
        assert!(resolution.rationale.contains("minimum"));
    }

    #[test]
    fn test_parse_resolution_rejects_out_of_range_confidence() {
        let response = r#"{
            "severity": "high",
            "description": "Cover logo is undersized",
            "confidence": 1.4,
            "rationale": "overconfident"
        }"#;

        let result = parse_resolution_response(conflict(), response);
        assert!(matches!(result, Err(DomainError::ConfidenceOutOfRange(_))));
    }

    #[test]
    fn test_parse_resolution_rejects_missing_field() {
        let response = r#"{"severity": "high", "confidence": 0.8}"#;
        let result = parse_resolution_response(conflict(), response);
        assert!(matches!(result, Err(DomainError::MalformedResponse(_))));
    }
}
