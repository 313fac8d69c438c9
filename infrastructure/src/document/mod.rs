//! Document loading

mod loader;

pub use loader::{DocumentLoadError, DocumentLoader};
