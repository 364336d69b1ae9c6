//! Uploaded files and their transport encoding.
//!
//! Files are handed to the extraction collaborator as plain base64 with no
//! `data:<mime>;base64,` prefix, alongside their MIME type.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::FileError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file the user selected for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Base64 payload ready for the extraction collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFile {
    pub data: String,
    pub mime_type: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn read(path: &Path) -> Result<Self, FileError> {
        let bytes = tokio::fs::read(path).await?;
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, mime_type, bytes))
    }

    /// Decode a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(name: impl Into<String>, url: &str) -> Result<Self, FileError> {
        let header = url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .map(|(header, _)| header)
            .ok_or(FileError::InvalidDataUrl)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(FileError::InvalidDataUrl)?;
        let mime_type = if mime_type.is_empty() {
            FALLBACK_MIME
        } else {
            mime_type
        };

        let bytes = STANDARD.decode(strip_data_url_prefix(url).trim())?;
        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn to_inline(&self) -> InlineFile {
        InlineFile {
            data: STANDARD.encode(&self.bytes),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Remove a leading `data:<mime>;base64,` header, if any.
pub fn strip_data_url_prefix(payload: &str) -> &str {
    if payload.starts_with("data:")
        && let Some((header, data)) = payload.split_once(',')
        && header.ends_with(";base64")
    {
        return data;
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_data_url_header() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,iVBORw0"), "iVBORw0");
        assert_eq!(strip_data_url_prefix("iVBORw0"), "iVBORw0");
        assert_eq!(
            strip_data_url_prefix("data:text/plain,hello"),
            "data:text/plain,hello"
        );
    }

    #[test]
    fn inline_payload_has_no_prefix() {
        let file = UploadedFile::new("dni.png", "image/png", b"hola".to_vec());
        let inline = file.to_inline();
        assert_eq!(inline.data, "aG9sYQ==");
        assert_eq!(inline.mime_type, "image/png");
    }

    #[test]
    fn decodes_data_url() {
        let file = UploadedFile::from_data_url("scan", "data:image/jpeg;base64,aG9sYQ==").unwrap();
        assert_eq!(file.mime_type, "image/jpeg");
        assert_eq!(file.bytes, b"hola");
        assert_eq!(file.to_inline().data, "aG9sYQ==");
    }

    #[test]
    fn rejects_non_base64_data_url() {
        assert!(matches!(
            UploadedFile::from_data_url("scan", "data:text/plain,hola"),
            Err(FileError::InvalidDataUrl)
        ));
        assert!(matches!(
            UploadedFile::from_data_url("scan", "aG9sYQ=="),
            Err(FileError::InvalidDataUrl)
        ));
    }

    #[tokio::test]
    async fn reads_file_and_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demanda.jpg");
        std::fs::write(&path, b"\xff\xd8\xff").unwrap();

        let file = UploadedFile::read(&path).await.unwrap();
        assert_eq!(file.name, "demanda.jpg");
        assert_eq!(file.mime_type, "image/jpeg");
        assert_eq!(file.bytes.len(), 3);
    }

    #[tokio::test]
    async fn unknown_extension_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.zzz");
        std::fs::write(&path, b"x").unwrap();

        let file = UploadedFile::read(&path).await.unwrap();
        assert_eq!(file.mime_type, "application/octet-stream");
    }
}
