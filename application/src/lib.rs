//! Application layer for doc-council
//!
//! This crate contains the review pipeline use case, port definitions, and
//! run-scoped configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ReviewParams;
pub use ports::{
    progress::{NoProgress, ProgressNotifier},
    reasoning::{GatewayError, ReasoningGateway},
};
pub use use_cases::run_review::{
    Phase, ReviewRun, RunReviewError, RunReviewInput, RunReviewUseCase,
};
