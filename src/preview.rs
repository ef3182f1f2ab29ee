// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Document preview
//!
//! Text documents are decoded as UTF-8. PDF bytes are handed to a
//! [`PdfViewer`], which decides how the browser displays them.

use tracing::warn;

use crate::config::PreviewConfig;
use crate::document::{DocumentKind, UploadedDocument};

/// Message shown when a text upload is not valid UTF-8
pub const DECODE_ERROR_MESSAGE: &str = "Cannot display this text file. Try another format.";

/// Result of previewing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Decoded text content
    Text { content: String, rows: u32 },
    /// Markup produced by the PDF viewer
    Pdf { markup: String },
    /// The document could not be displayed; the session carries on
    Unavailable { message: String },
}

/// Capability to display PDF bytes at a given size
pub trait PdfViewer: Send + Sync {
    /// Produce HTML showing the PDF found at `index` in the current batch
    fn render(&self, index: usize, document: &UploadedDocument, width: u32, height: u32) -> String;
}

/// Viewer that embeds the browser's own PDF renderer, pointing it at the
/// raw document route
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbedViewer;

impl PdfViewer for EmbedViewer {
    fn render(&self, index: usize, _document: &UploadedDocument, width: u32, height: u32) -> String {
        format!(
            r#"<embed src="/documents/{}/raw" type="application/pdf" width="{}" height="{}">"#,
            index, width, height
        )
    }
}

/// Build the preview for a document. Never fails: undecodable text turns
/// into [`Preview::Unavailable`].
pub fn render_preview(
    index: usize,
    document: &UploadedDocument,
    config: &PreviewConfig,
    viewer: &dyn PdfViewer,
) -> Preview {
    match document.kind() {
        DocumentKind::Text => match std::str::from_utf8(document.bytes()) {
            Ok(content) => Preview::Text {
                content: content.to_string(),
                rows: config.text_rows,
            },
            Err(e) => {
                warn!("Cannot decode {} as UTF-8: {}", document.name(), e);
                Preview::Unavailable {
                    message: DECODE_ERROR_MESSAGE.to_string(),
                }
            }
        },
        DocumentKind::Pdf => Preview::Pdf {
            markup: viewer.render(index, document, config.pdf_width, config.pdf_height),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_doc(bytes: &[u8]) -> UploadedDocument {
        UploadedDocument::new("doc.txt", DocumentKind::Text, bytes.to_vec())
    }

    #[test]
    fn test_text_preview_decodes_utf8() {
        let preview = render_preview(0, &text_doc("Grüße".as_bytes()), &PreviewConfig::default(), &EmbedViewer);
        assert_eq!(
            preview,
            Preview::Text {
                content: "Grüße".to_string(),
                rows: 15
            }
        );
    }

    #[test]
    fn test_invalid_utf8_is_recoverable() {
        let preview = render_preview(0, &text_doc(&[0x66, 0xff, 0xfe]), &PreviewConfig::default(), &EmbedViewer);
        assert_eq!(
            preview,
            Preview::Unavailable {
                message: DECODE_ERROR_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_pdf_uses_configured_size() {
        let doc = UploadedDocument::new("a.pdf", DocumentKind::Pdf, b"%PDF-1.4".to_vec());
        let config = PreviewConfig {
            pdf_width: 640,
            pdf_height: 480,
            text_rows: 10,
        };
        match render_preview(3, &doc, &config, &EmbedViewer) {
            Preview::Pdf { markup } => {
                assert!(markup.contains(r#"src="/documents/3/raw""#));
                assert!(markup.contains(r#"width="640""#));
                assert!(markup.contains(r#"height="480""#));
            }
            other => panic!("Expected PDF preview, got {:?}", other),
        }
    }

    #[test]
    fn test_preview_is_idempotent() {
        let doc = text_doc(b"same bytes");
        let config = PreviewConfig::default();
        assert_eq!(
            render_preview(0, &doc, &config, &EmbedViewer),
            render_preview(0, &doc, &config, &EmbedViewer)
        );
    }
}
