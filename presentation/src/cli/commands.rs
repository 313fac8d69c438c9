//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for review results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with per-analyzer detail and debate outcomes
    Full,
    /// Only the graded report
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for doc-council
#[derive(Parser, Debug)]
#[command(name = "doc-council")]
#[command(author, version, about = "Document review council - expert analyzers debate and reach consensus")]
#[command(long_about = r#"
Doc Council runs a council of expert analyzers over a document and produces
one prioritized, graded report.

The process has four phases:
1. Independent Analysis: Every analyzer assesses the document in parallel
2. Conflict Detection: Findings that describe the same issue with different
   severities are paired up
3. Debate: An arbiter model settles each conflict
4. Synthesis: Everything is folded into one prioritized report

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/doc-council/config.toml   Global config

Example:
  doc-council partnership-brief.md
  doc-council --context "Follow the 2024 brand guidelines" partnership-brief.md
  doc-council --output json --arbiter claude-opus-4.5 partnership-brief.md
"#)]
pub struct Cli {
    /// Path to the document to review
    pub document: Option<PathBuf>,

    /// Review guidelines passed to every analyzer
    #[arg(short = 'x', long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Read review guidelines from a file
    #[arg(long, value_name = "PATH", conflicts_with = "context")]
    pub context_file: Option<PathBuf>,

    /// Model to use as debate arbiter
    #[arg(long, value_name = "MODEL")]
    pub arbiter: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::parse_from(["doc-council", "brief.md"]);
        assert_eq!(cli.document.unwrap().to_str().unwrap(), "brief.md");
        assert!(matches!(cli.output, OutputFormat::Summary));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "doc-council",
            "-vv",
            "--output",
            "json",
            "--arbiter",
            "claude-opus-4.5",
            "--timeout",
            "30",
            "brief.md",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.arbiter.as_deref(), Some("claude-opus-4.5"));
        assert_eq!(cli.timeout, Some(30));
    }

    #[test]
    fn test_context_and_context_file_conflict() {
        let result = Cli::try_parse_from([
            "doc-council",
            "--context",
            "guidelines",
            "--context-file",
            "guide.md",
            "brief.md",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_show_config_needs_no_document() {
        let cli = Cli::parse_from(["doc-council", "--show-config"]);
        assert!(cli.document.is_none());
        assert!(cli.show_config);
    }
}
