//! Console output formatter for review results

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use council_application::ReviewRun;
use council_domain::Severity;

/// Formats review results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete review run
    pub fn format(run: &ReviewRun) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Document Review Council"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Document:".cyan().bold(),
            run.document
        ));

        // Phase 1: Analyzer assessments
        output.push_str(&Self::section_header("Phase 1: Independent Analysis"));
        for analysis in &run.analyses {
            output.push_str(&format!(
                "\n{}\n",
                format!("── {} (score {:.0}) ──", analysis.analyzer, analysis.score)
                    .yellow()
                    .bold()
            ));
            if analysis.findings.is_empty() {
                output.push_str("  No findings\n");
            }
            for finding in &analysis.findings {
                output.push_str(&format!(
                    "  {} {} ({:.0}% confident)\n",
                    Self::severity_tag(finding.severity),
                    finding.description,
                    finding.confidence * 100.0
                ));
            }
        }

        // Phase 3: Debates (if any)
        if !run.resolutions.is_empty() {
            output.push_str(&Self::section_header("Phase 3: Debates"));
            for resolution in &run.resolutions {
                let (first, second) = resolution.conflict.analyzers();
                output.push_str(&format!(
                    "\n{}\n{}\n{}\n",
                    format!("── {} vs {} ──", first, second).yellow().bold(),
                    format!(
                        "Decision: {} \"{}\" ({:.0}% confident)",
                        Self::severity_tag(resolution.severity),
                        resolution.description,
                        resolution.confidence * 100.0
                    ),
                    format!("Rationale: {}", resolution.rationale).dimmed()
                ));
            }
        }

        // Phase 4: Final report
        output.push_str(&Self::section_header("Phase 4: Final Report"));
        output.push('\n');
        output.push_str(&Self::report_body(run));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(run: &ReviewRun) -> String {
        serde_json::to_string_pretty(run).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the graded report only (concise output)
    pub fn format_summary(run: &ReviewRun) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Document Review Report ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Document:".bold(), run.document));
        output.push_str(&Self::report_body(run));

        output
    }

    fn report_body(run: &ReviewRun) -> String {
        let report = &run.report;
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} ({:.1}/100)\n\n",
            "Overall grade:".bold(),
            Self::grade_colored(&report.overall_grade),
            report.overall_score
        ));

        output.push_str(&format!("{}\n", "Analyzers:".cyan().bold()));
        for summary in &report.analyzers {
            output.push_str(&format!(
                "  {:<20} score {:>5.1}  issues {:>2}  weight x{}\n",
                summary.analyzer, summary.score, summary.issue_count, summary.weight
            ));
        }
        output.push('\n');

        let collab = &report.collaboration;
        let consensus = if collab.consensus_reached {
            "consensus reached".green()
        } else {
            "consensus not reached".yellow()
        };
        output.push_str(&format!(
            "{} {} conflicts, {} debates, {}\n\n",
            "Collaboration:".cyan().bold(),
            collab.conflicts_detected,
            collab.debates_conducted,
            consensus
        ));

        if report.final_issues.is_empty() {
            output.push_str(&format!("{}\n", "No issues found.".green()));
        } else {
            output.push_str(&format!("{}\n", "Issues by priority:".cyan().bold()));
            for issue in &report.final_issues {
                output.push_str(&format!(
                    "  {:>2}. {} {} ({})\n",
                    issue.priority,
                    Self::severity_tag(issue.severity),
                    issue.description,
                    issue.sources.join(" + ").dimmed()
                ));
                if !issue.recommendation.is_empty() {
                    output.push_str(&format!("      -> {}\n", issue.recommendation.dimmed()));
                }
            }
        }

        output
    }

    fn severity_tag(severity: Severity) -> ColoredString {
        let tag = format!("[{}]", severity.as_str().to_uppercase());
        match severity {
            Severity::Critical => tag.red().bold(),
            Severity::High => tag.red(),
            Severity::Medium => tag.yellow(),
            Severity::Low => tag.dimmed(),
        }
    }

    fn grade_colored(grade: &str) -> ColoredString {
        match grade {
            "A" => grade.green().bold(),
            "B" => grade.green(),
            "C" => grade.yellow(),
            "D" => grade.yellow().bold(),
            _ => grade.red().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, run: &ReviewRun) -> String {
        Self::format(run)
    }

    fn format_json(&self, run: &ReviewRun) -> String {
        Self::format_json(run)
    }

    fn format_summary(&self, run: &ReviewRun) -> String {
        Self::format_summary(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use council_domain::{synthesize, Analysis, Finding, Roster};

    fn run() -> ReviewRun {
        let roster = Roster::default_roster();
        let finding = Finding::new(
            "brand-compliance",
            "colors",
            "header uses off-brand teal",
            Severity::Medium,
            0.8,
        )
        .unwrap()
        .with_recommendation("Use the palette teal");
        let analyses = vec![
            Analysis::new("brand-compliance", 72.0, vec![finding]).unwrap(),
            Analysis::new("layout-quality", 90.0, vec![]).unwrap(),
            Analysis::new("accessibility", 88.0, vec![]).unwrap(),
            Analysis::new("content-quality", 95.0, vec![]).unwrap(),
        ];
        let report = synthesize("brief.md", &roster, &analyses, &[]);

        ReviewRun {
            document: "brief.md".to_string(),
            context: String::new(),
            started_at: Utc::now(),
            completed_at: Utc::now(),
            analyses,
            conflicts: vec![],
            resolutions: vec![],
            report,
        }
    }

    #[test]
    fn test_full_format_mentions_phases_and_findings() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&run());
        assert!(text.contains("Phase 1: Independent Analysis"));
        assert!(text.contains("Phase 4: Final Report"));
        assert!(text.contains("off-brand teal"));
        assert!(text.contains("[MEDIUM]"));
    }

    #[test]
    fn test_summary_format_has_grade_and_issues() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_summary(&run());
        assert!(text.contains("Overall grade:"));
        assert!(text.contains("Issues by priority:"));
        assert!(!text.contains("Phase 1"));
    }

    #[test]
    fn test_json_format_is_valid() {
        let json = ConsoleFormatter::format_json(&run());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["document"], "brief.md");
        assert!(value["report"]["overall_score"].is_number());
    }
}
