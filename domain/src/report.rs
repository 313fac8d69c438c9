//! Report synthesis - the coordinator step
//!
//! [`synthesize`] merges every analyzer's findings and every debate
//! resolution into one prioritized, graded report. It is a pure function:
//! all reasoning has already happened by the time it runs, so the report is
//! fully deterministic for a given input.

use crate::analyzer::Roster;
use crate::conflict::Resolution;
use crate::core::severity::Severity;
use crate::finding::Analysis;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Debate confidence above which a resolution counts toward consensus
pub const CONSENSUS_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// One deduplicated, prioritized issue in the final report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalIssue {
    /// 1-based rank, highest ranking weight first
    pub priority: usize,
    pub severity: Severity,
    pub description: String,
    /// Analyzers that contributed to this issue
    pub sources: Vec<String>,
    pub confidence: f64,
    pub recommendation: String,
    /// Ranking weight: severity rank x confidence
    pub weight: f64,
}

/// Per-analyzer summary line in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerSummary {
    pub analyzer: String,
    /// Self-reported document score (0-100)
    pub score: f64,
    /// Number of findings this analyzer contributed
    pub issue_count: usize,
    /// Configured authority weight
    pub weight: f64,
}

/// How much the council had to collaborate to agree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaboration {
    pub conflicts_detected: usize,
    pub debates_conducted: usize,
    /// True when no debate was needed, or every debate ended decisively
    pub consensus_reached: bool,
}

/// The final synthesized review report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Display name of the reviewed document
    pub document: String,
    pub analyzers: Vec<AnalyzerSummary>,
    pub collaboration: Collaboration,
    /// Deduplicated issues sorted by descending ranking weight
    pub final_issues: Vec<FinalIssue>,
    /// Weight-normalized average of analyzer self-scores (0-100)
    pub overall_score: f64,
    pub overall_grade: String,
}

impl Report {
    /// Issues at or above the given severity
    pub fn issues_at_least(&self, severity: Severity) -> impl Iterator<Item = &FinalIssue> {
        self.final_issues.iter().filter(move |i| i.severity >= severity)
    }
}

/// Map an overall score to a letter grade
pub fn grade_for(score: f64) -> &'static str {
    if score >= 90.0 {
        "A"
    } else if score >= 75.0 {
        "B"
    } else if score >= 60.0 {
        "C"
    } else if score >= 40.0 {
        "D"
    } else {
        "F"
    }
}

/// Merge all analyses and resolutions into the final report.
///
/// 1. Each resolution replaces its conflicting pair with one consolidated
///    issue carrying both source analyzers.
/// 2. Every finding not consumed by a resolution is carried over as-is.
/// 3. Issues are ranked by `severity rank x confidence` (stable sort, so
///    equal-weight issues keep insertion order: resolutions first, then
///    findings in roster order).
/// 4. The overall score is the authority-weighted average of analyzer
///    self-scores.
pub fn synthesize(
    document: &str,
    roster: &Roster,
    analyses: &[Analysis],
    resolutions: &[Resolution],
) -> Report {
    // Findings consumed by a resolution, keyed by (analyzer, description)
    let consumed: HashSet<(String, String)> = resolutions
        .iter()
        .flat_map(|r| [&r.conflict.first, &r.conflict.second])
        .map(|f| (f.analyzer.clone(), f.description.clone()))
        .collect();

    let mut issues: Vec<FinalIssue> = Vec::new();

    for resolution in resolutions {
        let (a, b) = resolution.conflict.analyzers();
        issues.push(FinalIssue {
            priority: 0, // assigned after ranking
            severity: resolution.severity,
            description: resolution.description.clone(),
            sources: vec![a.to_string(), b.to_string()],
            confidence: resolution.confidence,
            recommendation: resolution.recommendation().to_string(),
            weight: ranking_weight(resolution.severity, resolution.confidence),
        });
    }

    for analysis in analyses {
        for finding in &analysis.findings {
            let key = (finding.analyzer.clone(), finding.description.clone());
            if consumed.contains(&key) {
                continue;
            }
            issues.push(FinalIssue {
                priority: 0,
                severity: finding.severity,
                description: finding.description.clone(),
                sources: vec![finding.analyzer.clone()],
                confidence: finding.confidence,
                recommendation: finding.recommendation.clone(),
                weight: ranking_weight(finding.severity, finding.confidence),
            });
        }
    }

    // Stable: equal weights keep insertion order
    issues.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
    for (idx, issue) in issues.iter_mut().enumerate() {
        issue.priority = idx + 1;
    }

    let analyzers: Vec<AnalyzerSummary> = analyses
        .iter()
        .map(|analysis| AnalyzerSummary {
            analyzer: analysis.analyzer.clone(),
            score: analysis.score,
            issue_count: analysis.finding_count(),
            weight: analyzer_weight(roster, &analysis.analyzer),
        })
        .collect();

    let total_weight: f64 = analyzers.iter().map(|a| a.weight).sum();
    let overall_score = if total_weight > 0.0 {
        analyzers.iter().map(|a| a.score * a.weight).sum::<f64>() / total_weight
    } else {
        0.0
    };

    let consensus_reached = resolutions.is_empty()
        || resolutions
            .iter()
            .all(|r| r.is_decisive(CONSENSUS_CONFIDENCE_THRESHOLD));

    Report {
        document: document.to_string(),
        analyzers,
        collaboration: Collaboration {
            conflicts_detected: resolutions.len(),
            debates_conducted: resolutions.len(),
            consensus_reached,
        },
        final_issues: issues,
        overall_score,
        overall_grade: grade_for(overall_score).to_string(),
    }
}

fn ranking_weight(severity: Severity, confidence: f64) -> f64 {
    severity.rank() as f64 * confidence
}

fn analyzer_weight(roster: &Roster, name: &str) -> f64 {
    roster.get(name).map(|a| a.weight()).unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerSpec, Roster};
    use crate::conflict::Conflict;
    use crate::core::model::Model;
    use crate::finding::Finding;

    fn roster() -> Roster {
        Roster::new(vec![
            AnalyzerSpec::new("x", Model::default()).with_weight(2.0),
            AnalyzerSpec::new("y", Model::default()),
        ])
        .unwrap()
    }

    fn finding(analyzer: &str, description: &str, severity: Severity, confidence: f64) -> Finding {
        Finding::new(analyzer, "general", description, severity, confidence).unwrap()
    }

    fn analysis(analyzer: &str, score: f64, findings: Vec<Finding>) -> Analysis {
        Analysis::new(analyzer, score, findings).unwrap()
    }

    #[test]
    fn test_grade_banding_is_monotonic() {
        let grades: Vec<&str> = (0..=100).map(|s| grade_for(s as f64)).collect();
        for pair in grades.windows(2) {
            // Higher score never yields a worse grade (A < B lexicographically)
            assert!(pair[1] <= pair[0], "grade regressed: {} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_overall_score_is_weighted_average() {
        let analyses = vec![analysis("x", 90.0, vec![]), analysis("y", 60.0, vec![])];
        let report = synthesize("doc.pdf", &roster(), &analyses, &[]);

        // (90*2 + 60*1) / 3 = 80
        assert!((report.overall_score - 80.0).abs() < 1e-9);
        assert_eq!(report.overall_grade, "B");
    }

    #[test]
    fn test_overall_score_stays_within_input_range() {
        let analyses = vec![analysis("x", 85.0, vec![]), analysis("y", 55.0, vec![])];
        let report = synthesize("doc.pdf", &roster(), &analyses, &[]);

        assert!(report.overall_score <= 85.0);
        assert!(report.overall_score >= 55.0);
    }

    #[test]
    fn test_ranking_prefers_higher_severity_at_equal_confidence() {
        let analyses = vec![analysis(
            "x",
            70.0,
            vec![
                finding("x", "minor margin drift", Severity::Low, 0.9),
                finding("x", "contrast failure in body", Severity::Critical, 0.9),
            ],
        )];
        let report = synthesize("doc.pdf", &roster(), &analyses, &[]);

        assert_eq!(report.final_issues[0].description, "contrast failure in body");
        assert_eq!(report.final_issues[0].priority, 1);
        assert_eq!(report.final_issues[1].priority, 2);
    }

    #[test]
    fn test_resolution_consolidates_pair_into_one_issue() {
        let first = finding("x", "logo too small on cover", Severity::Medium, 0.7);
        let second = finding("y", "logo size too small cover page", Severity::High, 0.8);
        let analyses = vec![
            analysis("x", 80.0, vec![first.clone()]),
            analysis("y", 75.0, vec![second.clone()]),
        ];
        let conflict = Conflict::new(first, second, vec!["logo".into(), "small".into()]);
        let resolution =
            Resolution::new(conflict, Severity::High, "Cover logo undersized", 0.85, "evidence favors high")
                .unwrap();

        let report = synthesize("doc.pdf", &roster(), &analyses, &[resolution]);

        // 2 findings in, 1 resolution consuming both: exactly 1 issue out
        assert_eq!(report.final_issues.len(), 1);
        let issue = &report.final_issues[0];
        assert_eq!(issue.description, "Cover logo undersized");
        assert_eq!(issue.severity, Severity::High);
        assert_eq!(issue.sources, vec!["x".to_string(), "y".to_string()]);
        assert!(report.collaboration.consensus_reached);
    }

    #[test]
    fn test_no_silent_drops() {
        // 4 findings, 1 resolution consuming 2 of them: 3 issues out
        let a = finding("x", "logo too small on cover", Severity::Medium, 0.7);
        let b = finding("y", "logo size too small cover page", Severity::High, 0.8);
        let analyses = vec![
            analysis(
                "x",
                80.0,
                vec![a.clone(), finding("x", "margins drift on page three", Severity::Low, 0.6)],
            ),
            analysis(
                "y",
                75.0,
                vec![b.clone(), finding("y", "headline tone off for audience", Severity::Medium, 0.9)],
            ),
        ];
        let resolution = Resolution::new(
            Conflict::new(a, b, vec!["logo".into(), "small".into()]),
            Severity::High,
            "Cover logo undersized",
            0.9,
            "r",
        )
        .unwrap();

        let report = synthesize("doc.pdf", &roster(), &analyses, &[resolution]);
        assert_eq!(report.final_issues.len(), 3);
    }

    #[test]
    fn test_consensus_flag() {
        let a = finding("x", "logo too small on cover", Severity::Medium, 0.7);
        let b = finding("y", "logo size too small cover page", Severity::High, 0.8);
        let analyses = vec![analysis("x", 80.0, vec![a.clone()]), analysis("y", 75.0, vec![b.clone()])];

        let weak = Resolution::new(
            Conflict::new(a, b, vec!["logo".into(), "small".into()]),
            Severity::High,
            "Cover logo undersized",
            0.5,
            "uncertain",
        )
        .unwrap();

        let report = synthesize("doc.pdf", &roster(), &analyses, &[weak]);
        assert!(!report.collaboration.consensus_reached);
        assert_eq!(report.collaboration.debates_conducted, 1);
    }

    #[test]
    fn test_no_conflicts_reaches_consensus() {
        let analyses = vec![
            analysis("x", 80.0, vec![finding("x", "a b", Severity::Low, 0.5)]),
            analysis("y", 75.0, vec![finding("y", "c d", Severity::Low, 0.5)]),
        ];
        let report = synthesize("doc.pdf", &roster(), &analyses, &[]);

        assert!(report.collaboration.consensus_reached);
        assert_eq!(report.collaboration.conflicts_detected, 0);
        assert_eq!(report.final_issues.len(), 2);
    }

    #[test]
    fn test_issues_at_least_filters_by_severity() {
        let analyses = vec![analysis(
            "x",
            70.0,
            vec![
                finding("x", "a b", Severity::Low, 0.9),
                finding("x", "c d", Severity::High, 0.9),
                finding("x", "e f", Severity::Critical, 0.9),
            ],
        )];
        let report = synthesize("doc.pdf", &roster(), &analyses, &[]);

        assert_eq!(report.issues_at_least(Severity::High).count(), 2);
    }
}
