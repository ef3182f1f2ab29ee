// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Document Annotator
//!
//! Upload text and PDF documents, preview them, label them from a fixed
//! catalog of document classes and export the annotations as CSV.

pub mod annotation;
pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod preview;
pub mod session;
pub mod web;

pub use config::AppConfig;
pub use error::{AnnotatorError, Result};
