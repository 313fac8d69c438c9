//! Configuration loading and validation

mod file_config;
mod loader;

pub use file_config::{ConfigIssue, FileAnalyzerConfig, FileBehaviorConfig, FileConfig, FileProviderConfig};
pub use loader::ConfigLoader;
