//! Reads a document from disk into an immutable snapshot
//!
//! The pipeline reviews text, so only text formats are supported. The MIME
//! type is derived from the file extension and carried along for display
//! and prompt context.

use council_domain::DocumentSnapshot;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentLoadError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Document '{0}' is empty")]
    Empty(String),

    #[error("Document path '{0}' has no usable file name")]
    BadName(String),
}

/// Loads documents from the filesystem
pub struct DocumentLoader;

impl DocumentLoader {
    /// Read a document into a snapshot
    pub fn load(path: &Path) -> Result<DocumentSnapshot, DocumentLoadError> {
        let display = path.display().to_string();

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| DocumentLoadError::BadName(display.clone()))?;

        let text = std::fs::read_to_string(path).map_err(|source| DocumentLoadError::Io {
            path: display.clone(),
            source,
        })?;

        if text.trim().is_empty() {
            return Err(DocumentLoadError::Empty(name));
        }

        Ok(DocumentSnapshot::new(name, Self::mime_for(path), text))
    }

    /// Best-effort MIME type from the file extension
    fn mime_for(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("md") | Some("markdown") => "text/markdown",
            Some("html") | Some("htm") => "text/html",
            Some("json") => "application/json",
            Some("csv") => "text/csv",
            Some("xml") => "application/xml",
            Some("txt") | None => "text/plain",
            Some(_) => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.md");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# Partnership brief\n\nBody copy.").unwrap();

        let snapshot = DocumentLoader::load(&path).unwrap();
        assert_eq!(snapshot.name(), "brief.md");
        assert_eq!(snapshot.mime(), "text/markdown");
        assert!(snapshot.text().contains("Partnership brief"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = DocumentLoader::load(Path::new("/nonexistent/brief.md"));
        assert!(matches!(result, Err(DocumentLoadError::Io { .. })));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::File::create(&path).unwrap();

        let result = DocumentLoader::load(&path);
        assert!(matches!(result, Err(DocumentLoadError::Empty(_))));
    }

    #[test]
    fn test_mime_fallbacks() {
        assert_eq!(DocumentLoader::mime_for(Path::new("a.txt")), "text/plain");
        assert_eq!(DocumentLoader::mime_for(Path::new("a")), "text/plain");
        assert_eq!(
            DocumentLoader::mime_for(Path::new("a.bin")),
            "application/octet-stream"
        );
    }
}
