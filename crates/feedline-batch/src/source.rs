//! Document acquisition boundary
//!
//! Turning binary documents into text happens outside this crate. A
//! [`DocumentSource`] hands the orchestrator the text of one document.

use crate::SourceError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Reference to one input document (a file name, path or upload key)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentRef(String);

impl DocumentRef {
    /// Create a document reference
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The reference as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&Path> for DocumentRef {
    fn from(path: &Path) -> Self {
        Self::new(path.to_string_lossy())
    }
}

/// Something that can produce the extracted text of a document
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the full text of `document`
    async fn fetch_text(&self, document: &DocumentRef) -> Result<String, SourceError>;
}

/// Source backed by text already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: HashMap<DocumentRef, String>,
}

impl InMemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document (builder style)
    pub fn with_document(
        mut self,
        document: impl Into<DocumentRef>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(document, text);
        self
    }

    /// Add or replace a document
    pub fn insert(&mut self, document: impl Into<DocumentRef>, text: impl Into<String>) {
        self.documents.insert(document.into(), text.into());
    }

    /// References of every held document, sorted
    pub fn documents(&self) -> Vec<DocumentRef> {
        let mut refs: Vec<DocumentRef> = self.documents.keys().cloned().collect();
        refs.sort();
        refs
    }
}

#[async_trait]
impl DocumentSource for InMemorySource {
    async fn fetch_text(&self, document: &DocumentRef) -> Result<String, SourceError> {
        self.documents
            .get(document)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(document.to_string()))
    }
}

/// Source reading UTF-8 text files
///
/// References are paths, resolved against `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct TextFileSource {
    root: Option<PathBuf>,
}

impl TextFileSource {
    /// Resolve references as given
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve references relative to `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, document: &DocumentRef) -> PathBuf {
        match &self.root {
            Some(root) => root.join(document.as_str()),
            None => PathBuf::from(document.as_str()),
        }
    }
}

#[async_trait]
impl DocumentSource for TextFileSource {
    async fn fetch_text(&self, document: &DocumentRef) -> Result<String, SourceError> {
        let path = self.resolve(document);
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(path.display().to_string()),
            _ => SourceError::Io(e),
        })?;
        String::from_utf8(bytes)
            .map_err(|e| SourceError::Decode(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_in_memory_source() {
        let source = InMemorySource::new().with_document("a.txt", "VAS B1");
        assert_eq!(source.fetch_text(&"a.txt".into()).await.unwrap(), "VAS B1");
        assert!(matches!(
            source.fetch_text(&"missing.txt".into()).await,
            Err(SourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_text_file_source_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("vas.txt")).unwrap();
        writeln!(file, "VAS B2 12/15/2024 5,250").unwrap();

        let source = TextFileSource::with_root(dir.path());
        let text = source.fetch_text(&"vas.txt".into()).await.unwrap();
        assert!(text.starts_with("VAS B2"));
    }

    #[tokio::test]
    async fn test_text_file_source_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("binary.bin"), [0xff, 0xfe, 0x00]).unwrap();

        let source = TextFileSource::with_root(dir.path());
        assert!(matches!(
            source.fetch_text(&"nope.txt".into()).await,
            Err(SourceError::NotFound(_))
        ));
        assert!(matches!(
            source.fetch_text(&"binary.bin".into()).await,
            Err(SourceError::Decode(_))
        ));
    }
}
