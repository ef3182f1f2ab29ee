// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Label catalog: the fixed set of document classes offered to the user

use serde::{Deserialize, Serialize};

/// A single document class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCatalogEntry {
    pub name: String,
    pub description: String,
}

impl LabelCatalogEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Read-only list of document classes, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelCatalog {
    entries: Vec<LabelCatalogEntry>,
}

impl LabelCatalog {
    pub fn new(entries: Vec<LabelCatalogEntry>) -> Self {
        Self { entries }
    }

    /// All entries in display order
    pub fn entries(&self) -> &[LabelCatalogEntry] {
        &self.entries
    }

    /// Label names in display order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&LabelCatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// First entry, used as the default pick in single-label mode
    pub fn first(&self) -> Option<&LabelCatalogEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LabelCatalog {
    fn default() -> Self {
        let entries = [
            ("EPC (Energy Performance Certificate)", "A rating of the building's energy efficiency"),
            ("EPB (Energy Performance of Buildings)", "Compliance documentation for energy regulations"),
            ("Asbestos Report", "Mandatory documentation assessing the presence of asbestos"),
            ("Environmental Assessment", "Reports on soil, water, or other environmental risks"),
            ("Fire Safety Certificates", "Compliance documentation with fire regulations"),
            ("Lift Inspection Reports", "Maintenance and safety inspection reports for elevators"),
            ("Boiler Inspection Reports", "Compliance with heating installation requirements"),
            ("Electrical Inspection Reports", "Certification for electrical safety and compliance"),
            ("Water Quality Certification", "If applicable, particularly for drinking water or pools"),
            ("Accessibility Compliance Report", "Ensuring adherence to laws for disabled access"),
        ];

        Self::new(
            entries
                .into_iter()
                .map(|(name, description)| LabelCatalogEntry::new(name, description))
                .collect(),
        )
    }
}
