//! Article source file: first line is the title, the rest is the body.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::PostError;

/// Title used when the source file has no lines at all.
pub const UNTITLED: &str = "untitled";

/// A Markdown article split into title and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    /// Markdown body, without the title line.
    pub body: String,
}

impl Document {
    /// Split source text into title and body.
    ///
    /// The title is the first line with leading `#`/space characters removed,
    /// then trimmed. The body is every following line, trimmed as a whole.
    pub fn parse(content: &str) -> Self {
        let mut lines = content.lines();

        let title = match lines.next() {
            Some(first) => first.trim_start_matches(['#', ' ']).trim().to_string(),
            None => UNTITLED.to_string(),
        };
        let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();

        Self { title, body }
    }

    /// Read and parse an article file.
    pub fn read(path: &Path) -> Result<Self, PostError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(PostError::FileNotFound(path.to_path_buf()))
            }
            Err(e) => Err(PostError::Io(path.to_path_buf(), e)),
        }
    }

    /// Body length in characters.
    pub fn char_count(&self) -> usize {
        self.body.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_title_and_body() {
        let doc = Document::parse("# My Title\nHello");
        assert_eq!(doc.title, "My Title");
        assert_eq!(doc.body, "Hello");
    }

    #[test]
    fn test_empty_content() {
        let doc = Document::parse("");
        assert_eq!(doc.title, UNTITLED);
        assert_eq!(doc.body, "");
    }

    #[test]
    fn test_blank_first_line_gives_empty_title() {
        let doc = Document::parse("\nbody");
        assert_eq!(doc.title, "");
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_title_without_hash() {
        let doc = Document::parse("Plain title  \n\n\nFirst paragraph\n\nSecond\n\n");
        assert_eq!(doc.title, "Plain title");
        assert_eq!(doc.body, "First paragraph\n\nSecond");
    }

    #[test]
    fn test_title_strips_mixed_markers() {
        let doc = Document::parse("## # Deep  title\r\nbody line\r\n");
        assert_eq!(doc.title, "Deep  title");
        assert_eq!(doc.body, "body line");
    }

    #[test]
    fn test_inner_hashes_are_kept() {
        let doc = Document::parse("# C# tips");
        assert_eq!(doc.title, "C# tips");
    }

    #[test]
    fn test_char_count_counts_chars() {
        let doc = Document::parse("t\nこんにちは");
        assert_eq!(doc.char_count(), 5);
    }

    #[test]
    fn test_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("article.md");
        fs::write(&path, "# My Title\nHello\n").unwrap();

        let doc = Document::read(&path).unwrap();
        assert_eq!(doc.title, "My Title");
        assert_eq!(doc.body, "Hello");
    }

    #[test]
    fn test_read_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.md");
        fs::write(&path, "").unwrap();

        let doc = Document::read(&path).unwrap();
        assert_eq!(doc.title, UNTITLED);
        assert!(doc.body.is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.md");

        let err = Document::read(&path).unwrap_err();
        assert!(matches!(err, PostError::FileNotFound(p) if p == path));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bin.md");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = Document::read(&path).unwrap_err();
        assert!(matches!(err, PostError::Io(..)));
    }
}
