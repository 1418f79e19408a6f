//! Raw documents submitted for ingestion

use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::error::IngestError;

/// Where the content of a raw document comes from
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Content already in memory (e.g. a multipart upload)
    Bytes(Bytes),
    /// File on disk, read on demand
    Path(PathBuf),
}

/// An unparsed file submitted for ingestion
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// File name as submitted
    pub filename: String,
    /// Declared MIME type, if the client sent one
    pub content_type: Option<String>,
    /// Content source
    pub source: DocumentSource,
}

impl RawDocument {
    /// Create from uploaded bytes
    pub fn from_bytes(
        filename: impl Into<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            source: DocumentSource::Bytes(data.into()),
        }
    }

    /// Create from a file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Self {
            filename,
            content_type: None,
            source: DocumentSource::Path(path.to_path_buf()),
        }
    }

    /// Lowercased file extension, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
    }

    /// Whether the declared content type could be markdown text
    ///
    /// Browsers send `text/markdown`, `text/plain`, `application/octet-stream`
    /// or nothing at all for `.md` files.
    pub fn declares_text(&self) -> bool {
        match self.content_type.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(ct) => {
                let essence = ct.split(';').next().unwrap_or(ct).trim().to_lowercase();
                essence.starts_with("text/") || essence == "application/octet-stream"
            }
        }
    }

    /// Read the full content as UTF-8 text
    pub async fn read_text(&self) -> Result<String, IngestError> {
        let data = match &self.source {
            DocumentSource::Bytes(bytes) => bytes.to_vec(),
            DocumentSource::Path(path) => tokio::fs::read(path).await.map_err(|e| {
                IngestError::UnreadableContent(format!("{}: {}", path.display(), e))
            })?,
        };

        String::from_utf8(data).map_err(|_| {
            IngestError::UnreadableContent(format!("'{}' is not valid UTF-8 text", self.filename))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lowercased() {
        let doc = RawDocument::from_bytes("Guide.MD", None, "x");
        assert_eq!(doc.extension().as_deref(), Some("md"));

        let doc = RawDocument::from_bytes("README", None, "x");
        assert_eq!(doc.extension(), None);
    }

    #[test]
    fn test_declared_types() {
        let with = |ct: &str| RawDocument::from_bytes("a.md", Some(ct.to_string()), "x");

        assert!(RawDocument::from_bytes("a.md", None, "x").declares_text());
        assert!(with("text/markdown; charset=utf-8").declares_text());
        assert!(with("application/octet-stream").declares_text());
        assert!(!with("image/png").declares_text());
        assert!(!with("application/pdf").declares_text());
    }

    #[test]
    fn test_read_text_rejects_binary() {
        let doc = RawDocument::from_bytes("a.md", None, vec![0xff, 0xfe, 0x00]);
        let result = tokio_test::block_on(doc.read_text());
        assert!(matches!(result, Err(IngestError::UnreadableContent(_))));
    }

    #[test]
    fn test_read_text_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.md");
        std::fs::write(&path, "hello").unwrap();

        let doc = RawDocument::from_path(&path);
        assert_eq!(doc.filename, "guide.md");

        let rt = tokio::runtime::Runtime::new().unwrap();
        assert_eq!(rt.block_on(doc.read_text()).unwrap(), "hello");
    }
}
