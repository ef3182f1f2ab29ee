// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Feeds arbitrary uploads through intake, preview and CSV export.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use doc_annotator::annotation::{AnnotationForm, LabelMode};
use doc_annotator::catalog::LabelCatalog;
use doc_annotator::config::PreviewConfig;
use doc_annotator::preview::{render_preview, EmbedViewer};
use doc_annotator::session::{Session, UploadPart};

#[derive(Arbitrary, Debug)]
struct Input {
    name: String,
    mime: Option<String>,
    bytes: Vec<u8>,
    custom_label: String,
    comment: String,
    single: bool,
}

fuzz_target!(|input: Input| {
    let mode = if input.single { LabelMode::Single } else { LabelMode::Multi };
    let mut session = Session::new(mode, LabelCatalog::default(), true);
    session.upload(vec![UploadPart {
        name: input.name.clone(),
        mime: input.mime,
        bytes: input.bytes,
    }]);

    if let Some((index, doc)) = session.find_document(&input.name) {
        let _ = render_preview(index, doc, &PreviewConfig::default(), &EmbedViewer);
    }

    let form = AnnotationForm::new(input.name)
        .custom_label(input.custom_label)
        .comment(input.comment);
    if session.save(form).is_ok() {
        let csv = session.export_csv().unwrap_or_default();
        assert!(csv.starts_with("document,"));
    }
});
