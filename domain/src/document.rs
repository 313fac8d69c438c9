//! Document snapshot value object

use serde::{Deserialize, Serialize};

/// An immutable snapshot of the document under review (Value Object)
///
/// The review pipeline never interprets the document itself; it carries the
/// extracted text to every analyzer unchanged, plus a display name and MIME
/// tag for reporting. Rendering, rasterization, and pixel-level analysis all
/// happen upstream of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    name: String,
    mime: String,
    text: String,
}

impl DocumentSnapshot {
    /// Create a new snapshot
    ///
    /// # Panics
    /// Panics if the name is empty or only whitespace
    pub fn new(name: impl Into<String>, mime: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.trim().is_empty(), "Document name cannot be empty");
        Self {
            name,
            mime: mime.into(),
            text: text.into(),
        }
    }

    /// Try to create a snapshot, returning None if the name is invalid
    pub fn try_new(
        name: impl Into<String>,
        mime: impl Into<String>,
        text: impl Into<String>,
    ) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self {
                name,
                mime: mime.into(),
                text: text.into(),
            })
        }
    }

    /// Display name of the document (usually the file name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type tag (e.g. "application/pdf", "text/markdown")
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Extracted document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// A prefix of the document text bounded to at most `max_chars`
    /// characters, cut on a char boundary. Used when embedding the document
    /// into a prompt.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

impl std::fmt::Display for DocumentSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.mime)
    }
}
