//! Syllabus text loading.

use std::path::Path;

use studyplan_core::{Error, Result};
use tracing::debug;

/// Syllabus file types by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Markdown,
    Pdf,
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => Self::PlainText,
            "md" | "mdx" => Self::Markdown,
            "pdf" => Self::Pdf,
            _ => Self::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }
}

/// Read syllabus text from a file.
///
/// PDF files, invalid UTF-8 and content that looks binary are rejected with
/// `Error::Ingest`; their text must be extracted before it reaches the
/// outline extractor. A file that cannot be read at all is `Error::Io`.
pub fn load_text(path: &Path) -> Result<String> {
    if FileType::from_path(path) == FileType::Pdf {
        return Err(Error::Ingest(format!(
            "{}: PDF text must be extracted before ingestion",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)?;
    let content = String::from_utf8(bytes).map_err(|e| {
        Error::Ingest(format!("{}: not a UTF-8 text file ({})", path.display(), e))
    })?;
    if looks_binary(&content) {
        return Err(Error::Ingest(format!(
            "{}: content looks binary",
            path.display()
        )));
    }

    debug!("Loaded {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// More than a tenth of the characters are control characters other than
/// line breaks and tabs.
fn looks_binary(content: &str) -> bool {
    let control = content
        .chars()
        .filter(|c| c.is_control() && *c != '\n' && *c != '\r' && *c != '\t')
        .count();
    control > content.len() / 10
}
