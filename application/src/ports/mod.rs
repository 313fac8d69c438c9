//! Port definitions
//!
//! Interfaces the application layer depends on. Implementations (adapters)
//! live in the infrastructure and presentation layers.

pub mod progress;
pub mod reasoning;
