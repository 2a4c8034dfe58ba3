//! Plain-text content shared by the primary view and the mini-content proxy.

use std::path::{Path, PathBuf};

/// Newline-delimited content, split once into lines.
///
/// The text is kept verbatim apart from line terminators: `\r\n` and `\n`
/// both end a line, and a trailing newline does not produce an extra empty
/// line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    source: Option<PathBuf>,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
        Self {
            lines,
            source: None,
        }
    }

    /// Read a document from disk
    pub async fn load(path: &Path) -> crate::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let text = String::from_utf8(bytes)
            .map_err(|e| crate::Error::Encoding(format!("{}: {}", path.display(), e)))?;
        let doc = Self::from_text(&text).with_source(path.to_path_buf());
        tracing::debug!(path = %path.display(), lines = doc.line_count(), "document loaded");
        Ok(doc)
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Lines in `[start, start + len)`, truncated at the end of the document
    pub fn window(&self, start: usize, len: usize) -> &[String] {
        let start = start.min(self.lines.len());
        let end = start.saturating_add(len).min(self.lines.len());
        &self.lines[start..end]
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Display name: the file name when loaded from disk
    pub fn name(&self) -> String {
        self.source
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[scratch]".to_string())
    }

    /// Record the file the text came from
    pub fn with_source(mut self, path: PathBuf) -> Self {
        self.source = Some(path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        let doc = Document::from_text("a\nb\r\nc\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(1), Some("b"));
        assert_eq!(doc.line(3), None);
    }

    #[test]
    fn test_empty_text() {
        let doc = Document::from_text("");
        assert!(doc.is_empty());
        assert_eq!(doc.window(0, 10).len(), 0);
    }

    #[test]
    fn test_window_truncates() {
        let doc = Document::from_text("1\n2\n3\n4");
        assert_eq!(doc.window(2, 10), &["3".to_string(), "4".to_string()]);
        assert!(doc.window(9, 2).is_empty());
    }

    #[test]
    fn test_name() {
        let doc = Document::from_text("x").with_source(PathBuf::from("/tmp/main.rs"));
        assert_eq!(doc.name(), "main.rs");
        assert_eq!(Document::default().name(), "[scratch]");
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "fn main() {}\n// end\n").unwrap();

        let doc = Document::load(&path).await.unwrap();
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.source(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_load_rejects_binary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(
            Document::load(&path).await,
            Err(crate::Error::Encoding(_))
        ));
    }
}
