//! Infrastructure layer for doc-council
//!
//! Adapters that connect the application layer to the outside world:
//! configuration files, the reasoning backend, and documents on disk.

pub mod config;
pub mod document;
pub mod providers;

pub use config::{ConfigLoader, FileConfig};
pub use document::DocumentLoader;
pub use providers::OpenAiCompatGateway;
