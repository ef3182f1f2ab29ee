// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Annotation records, the label form and the session's annotation store

pub mod form;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use form::AnnotationForm;
pub use store::AnnotationStore;

/// Separator between labels when a list is written as one field
pub const LABEL_SEPARATOR: &str = "; ";

/// How labels are picked in the annotation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// Any number of catalog labels plus an optional custom label
    #[default]
    Multi,
    /// Exactly one catalog label
    Single,
}

impl LabelMode {
    /// Name of the label column in exports
    pub fn label_column(&self) -> &'static str {
        match self {
            Self::Multi => "labels",
            Self::Single => "label",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Multi => "multi",
            Self::Single => "single",
        }
    }
}

impl std::str::FromStr for LabelMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "multi" => Ok(Self::Multi),
            "single" => Ok(Self::Single),
            other => Err(format!("unknown label mode '{}', expected multi or single", other)),
        }
    }
}

/// Labels attached to one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Labels {
    Multi(Vec<String>),
    Single(String),
}

impl Labels {
    /// The labels as a single field value, list entries joined by `"; "`
    pub fn joined(&self) -> String {
        match self {
            Self::Multi(labels) => labels.join(LABEL_SEPARATOR),
            Self::Single(label) => label.clone(),
        }
    }

    pub fn mode(&self) -> LabelMode {
        match self {
            Self::Multi(_) => LabelMode::Multi,
            Self::Single(_) => LabelMode::Single,
        }
    }
}

/// One saved annotation. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationRecord {
    pub id: String,
    pub document: String,
    pub labels: Labels,
    pub comment: String,
    pub saved_at: DateTime<Utc>,
}

impl AnnotationRecord {
    pub fn new(document: impl Into<String>, labels: Labels, comment: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            document: document.into(),
            labels,
            comment: comment.into(),
            saved_at: Utc::now(),
        }
    }
}
