// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Session context
//!
//! A [`Session`] owns everything the user produces while the tool runs: the
//! uploaded batch, the annotation store and the filter toggle. It is created
//! at startup, passed explicitly to every operation and dropped on shutdown.

use tracing::{debug, info, warn};

use crate::annotation::{AnnotationForm, AnnotationRecord, AnnotationStore, LabelMode};
use crate::catalog::LabelCatalog;
use crate::config::AppConfig;
use crate::document::{DocumentSummary, UploadedDocument};
use crate::export;
use crate::Result;

/// Which documents the selector offers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Nothing has been uploaded yet
    NoDocuments,
    /// Documents exist but none are left to offer
    Complete,
    /// Selectable names, in upload order
    Available(Vec<&'a str>),
}

/// One file in an upload request
#[derive(Debug, Clone)]
pub struct UploadPart {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

/// Outcome of an upload request
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub accepted: Vec<String>,
    /// Files left out, with the reason
    pub rejected: Vec<(String, String)>,
}

/// Mutable state for one user's session
#[derive(Debug, Clone)]
pub struct Session {
    documents: Vec<UploadedDocument>,
    store: AnnotationStore,
    show_unannotated_only: bool,
    mode: LabelMode,
    catalog: LabelCatalog,
}

impl Session {
    pub fn new(mode: LabelMode, catalog: LabelCatalog, show_unannotated_only: bool) -> Self {
        Self {
            documents: Vec::new(),
            store: AnnotationStore::new(),
            show_unannotated_only,
            mode,
            catalog,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.annotation.mode,
            config.catalog.clone(),
            config.annotation.show_unannotated_only,
        )
    }

    pub fn mode(&self) -> LabelMode {
        self.mode
    }

    pub fn catalog(&self) -> &LabelCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn documents(&self) -> &[UploadedDocument] {
        &self.documents
    }

    pub fn show_unannotated_only(&self) -> bool {
        self.show_unannotated_only
    }

    pub fn set_show_unannotated_only(&mut self, enabled: bool) {
        debug!("Show only unannotated: {}", enabled);
        self.show_unannotated_only = enabled;
    }

    /// Add a batch of uploads. Unsupported files are skipped and reported;
    /// the rest of the batch is still accepted.
    pub fn upload(&mut self, parts: Vec<UploadPart>) -> UploadReport {
        let mut report = UploadReport::default();

        for part in parts {
            match UploadedDocument::from_upload(&part.name, part.mime.as_deref(), part.bytes) {
                Ok(doc) => {
                    info!("Uploaded {} ({:?}, {} bytes)", doc.name(), doc.kind(), doc.size());
                    report.accepted.push(doc.name().to_string());
                    self.documents.push(doc);
                }
                Err(e) => {
                    warn!("Skipping upload {}: {}", part.name, e);
                    report.rejected.push((part.name, e.to_string()));
                }
            }
        }

        report
    }

    /// Remove the first document with this name from the batch. Saved
    /// annotations are kept.
    pub fn remove_document(&mut self, name: &str) -> Option<UploadedDocument> {
        let index = self.documents.iter().position(|d| d.name() == name)?;
        info!("Removed document {}", name);
        Some(self.documents.remove(index))
    }

    /// First document with this name, with its position in the batch
    pub fn find_document(&self, name: &str) -> Option<(usize, &UploadedDocument)> {
        self.documents.iter().enumerate().find(|(_, d)| d.name() == name)
    }

    pub fn document_at(&self, index: usize) -> Option<&UploadedDocument> {
        self.documents.get(index)
    }

    /// Documents the selector should offer under the current toggle
    pub fn selectable(&self) -> Selection<'_> {
        if self.documents.is_empty() {
            return Selection::NoDocuments;
        }

        let annotated = self.store.annotated_names();
        let names: Vec<&str> = self
            .documents
            .iter()
            .map(|d| d.name())
            .filter(|name| !self.show_unannotated_only || !annotated.contains(name))
            .collect();

        if names.is_empty() {
            Selection::Complete
        } else {
            Selection::Available(names)
        }
    }

    /// The document to show: the requested one if it is selectable,
    /// otherwise the first selectable one
    pub fn current<'a>(&'a self, requested: Option<&str>) -> Option<(usize, &'a UploadedDocument)> {
        let Selection::Available(names) = self.selectable() else {
            return None;
        };

        let name = requested
            .and_then(|r| names.iter().copied().find(|n| *n == r))
            .or_else(|| names.first().copied())?;
        self.find_document(name)
    }

    /// Save a form submission as a new record
    pub fn save(&mut self, form: AnnotationForm) -> Result<&AnnotationRecord> {
        let record = form.into_record(self.mode, &self.catalog)?;
        if self.store.count_for(&record.document) > 0 {
            warn!(
                "{} already has an annotation, appending another record",
                record.document
            );
        }
        info!("Saved annotation for {}: {}", record.document, record.labels.joined());
        Ok(self.store.append(record))
    }

    /// CSV export of the store, or `None` while it is empty
    pub fn export_csv(&self) -> Option<String> {
        if self.store.is_empty() {
            return None;
        }
        Some(export::to_csv(self.store.all(), self.mode))
    }

    /// Per-document summaries for the JSON API
    pub fn summaries(&self) -> Vec<DocumentSummary> {
        let annotated = self.store.annotated_names();
        self.documents
            .iter()
            .enumerate()
            .map(|(index, d)| DocumentSummary {
                index,
                name: d.name().to_string(),
                kind: d.kind(),
                size: d.size(),
                annotated: annotated.contains(d.name()),
            })
            .collect()
    }
}
