// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for the document annotator

use thiserror::Error;

/// Result type alias for annotator operations
pub type Result<T> = std::result::Result<T, AnnotatorError>;

/// Annotator error types
#[derive(Error, Debug)]
pub enum AnnotatorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Upload too large: {0}")]
    UploadTooLarge(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl AnnotatorError {
    /// Whether the error was caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Upload(_)
                | Self::UploadTooLarge(_)
                | Self::UnsupportedFileType(_)
                | Self::UnknownLabel(_)
        )
    }
}
