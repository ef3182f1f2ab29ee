// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for the document annotator

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::annotation::LabelMode;
use crate::catalog::LabelCatalog;

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    /// Web UI settings
    #[serde(default)]
    pub web: WebConfig,

    /// Annotation form behaviour
    #[serde(default)]
    pub annotation: AnnotationConfig,

    /// Document preview settings
    #[serde(default)]
    pub preview: PreviewConfig,

    /// CSV export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Document classes offered in the label form
    #[serde(default)]
    pub catalog: LabelCatalog,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// Request body cap for uploads, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnnotationConfig {
    #[serde(default)]
    pub mode: LabelMode,
    /// Initial state of the "show only unannotated" toggle
    #[serde(default = "default_true")]
    pub show_unannotated_only: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PreviewConfig {
    #[serde(default = "default_pdf_width")]
    pub pdf_width: u32,
    #[serde(default = "default_pdf_height")]
    pub pdf_height: u32,
    #[serde(default = "default_text_rows")]
    pub text_rows: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_export_filename")]
    pub filename: String,
}

// Default value functions
fn default_true() -> bool { true }
fn default_web_host() -> String { "127.0.0.1".to_string() }
fn default_web_port() -> u16 { 8501 }
fn default_max_upload_bytes() -> usize { 50 * 1024 * 1024 }
fn default_pdf_width() -> u32 { 1000 }
fn default_pdf_height() -> u32 { 1200 }
fn default_text_rows() -> u32 { 15 }
fn default_export_filename() -> String { "labeled_documents.csv".to_string() }

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            mode: LabelMode::default(),
            show_unannotated_only: true,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            pdf_width: default_pdf_width(),
            pdf_height: default_pdf_height(),
            text_rows: default_text_rows(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: default_export_filename(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::AnnotatorError::Config(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the form cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.catalog.is_empty() {
            return Err(crate::AnnotatorError::Config(
                "Label catalog must contain at least one entry".to_string(),
            ));
        }
        if self.export.filename.trim().is_empty() {
            return Err(crate::AnnotatorError::Config(
                "Export filename must not be empty".to_string(),
            ));
        }
        // The name ends up quoted inside a Content-Disposition header
        if self
            .export
            .filename
            .chars()
            .any(|c| c.is_control() || matches!(c, '"' | '\\' | '/'))
        {
            return Err(crate::AnnotatorError::Config(format!(
                "Export filename {:?} contains characters not allowed in a download name",
                self.export.filename
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.web.port, 8501);
        assert_eq!(config.annotation.mode, LabelMode::Multi);
        assert!(config.annotation.show_unannotated_only);
        assert_eq!(config.export.filename, "labeled_documents.csv");
        assert_eq!(config.catalog.len(), 10);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"annotation": {"mode": "single"}, "web": {"port": 9000}}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.annotation.mode, LabelMode::Single);
        assert!(config.annotation.show_unannotated_only);
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.preview.pdf_width, 1000);
        assert_eq!(config.preview.pdf_height, 1200);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.preview.pdf_height = 800;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.preview.pdf_height, 800);
        assert_eq!(loaded.catalog, config.catalog);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"catalog": []}"#).unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, crate::AnnotatorError::Config(_)));
    }

    #[test]
    fn test_export_filename_must_be_header_safe() {
        for bad in ["quo\"te.csv", "line\nbreak.csv", "dir/name.csv", "back\\slash.csv"] {
            let mut config = AppConfig::default();
            config.export.filename = bad.to_string();
            assert!(
                matches!(config.validate(), Err(crate::AnnotatorError::Config(_))),
                "{:?} should be rejected",
                bad
            );
        }

        let mut config = AppConfig::default();
        config.export.filename = "annotations 2025.csv".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
