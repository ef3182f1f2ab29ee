// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Label assignment form

use tracing::debug;

use super::{AnnotationRecord, LabelMode, Labels};
use crate::catalog::LabelCatalog;
use crate::{AnnotatorError, Result};

/// Values submitted by the annotation form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationForm {
    /// Document being annotated
    pub document: String,
    /// Catalog labels picked by the user, in submission order
    pub selected: Vec<String>,
    /// Free-text label, only used in multi mode
    pub custom_label: String,
    pub comment: String,
}

impl AnnotationForm {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            ..Self::default()
        }
    }

    pub fn select(mut self, label: impl Into<String>) -> Self {
        self.selected.push(label.into());
        self
    }

    pub fn custom_label(mut self, label: impl Into<String>) -> Self {
        self.custom_label = label.into();
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Turn the submission into a record.
    ///
    /// Empty selections and empty comments are accepted. Selected labels must
    /// come from the catalog.
    pub fn into_record(self, mode: LabelMode, catalog: &LabelCatalog) -> Result<AnnotationRecord> {
        if let Some(unknown) = self.selected.iter().find(|l| !catalog.contains(l)) {
            return Err(AnnotatorError::UnknownLabel(unknown.clone()));
        }

        let labels = match mode {
            LabelMode::Multi => {
                let mut labels = self.selected;
                // Whitespace-only input counts as no custom label
                if !self.custom_label.trim().is_empty() {
                    labels.push(self.custom_label);
                }
                Labels::Multi(labels)
            }
            LabelMode::Single => {
                if self.selected.len() > 1 {
                    debug!(
                        "Single-label form got {} labels, keeping the first",
                        self.selected.len()
                    );
                }
                // A select box always has a value; its default is the first entry
                let label = match self.selected.into_iter().next() {
                    Some(label) => label,
                    None => catalog
                        .first()
                        .map(|e| e.name.clone())
                        .ok_or_else(|| AnnotatorError::Config("Label catalog is empty".to_string()))?,
                };
                Labels::Single(label)
            }
        };

        Ok(AnnotationRecord::new(self.document, labels, self.comment))
    }
}
