//! Conflict detection over a complete finding set
//!
//! Pure domain logic: no I/O, no ordering dependence beyond the input slice
//! itself. Two findings are "the same underlying issue" when their
//! descriptions share at least [`MIN_SHARED_TOKENS`] case-insensitive word
//! tokens; among similar pairs, only those with differing severities become
//! conflicts. This is a cheap, reproducible heuristic, not semantic matching.
//!
//! Complexity is O(n²) over findings per run, which is fine: n is bounded by
//! analyzer count times findings per analyzer, typically well under 100.

use super::Conflict;
use crate::finding::Finding;
use std::collections::BTreeSet;

/// Minimum shared description tokens for two findings to count as the same issue
pub const MIN_SHARED_TOKENS: usize = 2;

/// Case-insensitive word tokens of a description, deduplicated and sorted
fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Tokens common to both descriptions, in sorted order
pub fn shared_tokens(a: &str, b: &str) -> Vec<String> {
    tokenize(a).intersection(&tokenize(b)).cloned().collect()
}

/// Detect conflicts across the complete finding set of one run.
///
/// Every unordered pair of findings from *different* analyzers is compared;
/// an analyzer never conflicts with itself. When more than two analyzers
/// report the same issue, conflicts are emitted pairwise, so one finding may
/// appear in several conflicts.
pub fn detect(findings: &[Finding]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (i, first) in findings.iter().enumerate() {
        for second in &findings[i + 1..] {
            if first.analyzer == second.analyzer {
                continue;
            }
            if first.severity == second.severity {
                continue;
            }

            let shared = shared_tokens(&first.description, &second.description);
            if shared.len() >= MIN_SHARED_TOKENS {
                conflicts.push(Conflict::new(first.clone(), second.clone(), shared));
            }
        }
    }

    conflicts
}
