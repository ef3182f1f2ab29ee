// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Append-only, in-memory annotation store

use std::collections::HashSet;

use super::AnnotationRecord;

/// Records saved during the session, in insertion order.
///
/// Saving twice for the same document keeps both records.
#[derive(Debug, Default, Clone)]
pub struct AnnotationStore {
    records: Vec<AnnotationRecord>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return a reference to it
    pub fn append(&mut self, record: AnnotationRecord) -> &AnnotationRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// All records in insertion order
    pub fn all(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names of every document with at least one record
    pub fn annotated_names(&self) -> HashSet<&str> {
        self.records.iter().map(|r| r.document.as_str()).collect()
    }

    /// Number of records saved for a document
    pub fn count_for(&self, document: &str) -> usize {
        self.records.iter().filter(|r| r.document == document).count()
    }
}
