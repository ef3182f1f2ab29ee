// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Uploaded documents and the type resolution applied at intake

use serde::Serialize;
use std::path::Path;

use crate::{AnnotatorError, Result};

/// Supported document kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Pdf,
}

impl DocumentKind {
    /// MIME type served for this kind
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Pdf => "application/pdf",
        }
    }

    /// File extensions accepted for this kind
    pub fn supported_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Text => &["txt"],
            Self::Pdf => &["pdf"],
        }
    }

    /// Map a MIME type reported by the browser
    pub fn from_mime(mime: &str) -> Option<Self> {
        // Browsers may append parameters, e.g. "text/plain; charset=utf-8"
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "text/plain" => Some(Self::Text),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Map a filename by its extension
    pub fn from_extension(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension().and_then(|e| e.to_str())?;
        [Self::Text, Self::Pdf]
            .into_iter()
            .find(|kind| kind.supported_extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Resolve the kind of an upload.
    ///
    /// The browser's MIME type wins. A generic or missing type falls back to
    /// the file extension; anything else is rejected.
    pub fn resolve(name: &str, mime: Option<&str>) -> Result<Self> {
        let kind = match mime.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) if is_generic_mime(m) => Self::from_extension(name),
            Some(m) => Self::from_mime(m),
            None => Self::from_extension(name),
        };
        kind.ok_or_else(|| {
            AnnotatorError::UnsupportedFileType(format!(
                "{} ({})",
                name,
                mime.unwrap_or("no content type")
            ))
        })
    }
}

fn is_generic_mime(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case("application/octet-stream")
}

/// A document uploaded during the session. Immutable once created.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    name: String,
    kind: DocumentKind,
    bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, kind: DocumentKind, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            kind,
            bytes,
        }
    }

    /// Build a document from an upload triple, resolving its kind
    pub fn from_upload(name: &str, mime: Option<&str>, bytes: Vec<u8>) -> Result<Self> {
        let kind = DocumentKind::resolve(name, mime)?;
        Ok(Self::new(name, kind, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Summary of a document, as exposed by the JSON API
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub index: usize,
    pub name: String,
    pub kind: DocumentKind,
    pub size: usize,
    pub annotated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_wins_over_extension() {
        assert_eq!(DocumentKind::resolve("scan.txt", Some("application/pdf")).unwrap(), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::resolve("notes", Some("text/plain; charset=utf-8")).unwrap(),
            DocumentKind::Text
        );
    }

    #[test]
    fn test_generic_mime_falls_back_to_extension() {
        assert_eq!(
            DocumentKind::resolve("report.PDF", Some("application/octet-stream")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(DocumentKind::resolve("notes.txt", None).unwrap(), DocumentKind::Text);
    }

    #[test]
    fn test_unsupported_type_rejected() {
        let err = DocumentKind::resolve("photo.png", Some("image/png")).unwrap_err();
        assert!(matches!(err, AnnotatorError::UnsupportedFileType(_)));

        let err = DocumentKind::resolve("archive.zip", None).unwrap_err();
        assert!(err.to_string().contains("archive.zip"));
    }

    #[test]
    fn test_from_upload_keeps_bytes() {
        let doc = UploadedDocument::from_upload("a.txt", Some("text/plain"), b"hello".to_vec()).unwrap();
        assert_eq!(doc.name(), "a.txt");
        assert_eq!(doc.kind(), DocumentKind::Text);
        assert_eq!(doc.bytes(), b"hello");
        assert_eq!(doc.size(), 5);
    }
}
