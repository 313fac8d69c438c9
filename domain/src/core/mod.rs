//! Core domain primitives
//!
//! Fundamental value objects shared by every other domain module.

pub mod error;
pub mod model;
pub mod severity;

pub use error::DomainError;
pub use model::Model;
pub use severity::Severity;
