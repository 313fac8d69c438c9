//! Use cases

pub mod run_review;
