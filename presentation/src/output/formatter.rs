//! Output formatter trait

use council_application::ReviewRun;

/// Trait for formatting review results
pub trait OutputFormatter {
    /// Format the complete review run with per-analyzer detail
    fn format(&self, run: &ReviewRun) -> String;

    /// Format as JSON
    fn format_json(&self, run: &ReviewRun) -> String;

    /// Format the graded report only (concise output)
    fn format_summary(&self, run: &ReviewRun) -> String;
}
