//! Domain layer for doc-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council is a fixed roster of expert analyzers, each specializing in one
//! expertise area (brand compliance, layout, accessibility, content quality)
//! and carrying a configured authority weight.
//!
//! ## Review
//!
//! One review runs in four phases:
//!
//! 1. **Dispatch**: every analyzer assesses the document independently
//! 2. **Conflict Detection**: findings describing the same issue with
//!    differing severities are paired into conflicts
//! 3. **Debate**: an arbiter resolves each conflict into one consolidated
//!    assessment
//! 4. **Synthesis**: all findings and resolutions merge into one prioritized,
//!    graded report

pub mod analyzer;
pub mod conflict;
pub mod core;
pub mod document;
pub mod finding;
pub mod prompt;
pub mod report;
pub mod response;

// Re-export commonly used types
pub use analyzer::{AnalyzerSpec, Roster};
pub use conflict::{Conflict, Resolution, detector};
pub use core::{error::DomainError, model::Model, severity::Severity};
pub use document::DocumentSnapshot;
pub use finding::{Analysis, Finding};
pub use prompt::PromptTemplate;
pub use report::{AnalyzerSummary, Collaboration, FinalIssue, Report, synthesize};
pub use response::{ResolutionVerdict, parse_analysis_response, parse_resolution_response};
