// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! HTML rendering for the annotator pages

use crate::annotation::{AnnotationRecord, LabelMode};
use crate::catalog::LabelCatalog;
use crate::config::AppConfig;
use crate::document::UploadedDocument;
use crate::preview::{render_preview, PdfViewer, Preview};
use crate::session::{Selection, Session};

/// Status message shown at the top of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Info(_) => "info",
            Self::Error(_) => "error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Info(m) | Self::Error(m) => m,
        }
    }
}

/// Escape text for use in HTML content and attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn base_template(title: &str, content: &str) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Document Annotator</title>
    <style>
        :root {{
            --bg-primary: #f6f7fb;
            --bg-card: #ffffff;
            --text-primary: #1f2430;
            --text-secondary: #6b7280;
            --accent: #3056d3;
            --success: #1f9d6b;
            --error: #d64545;
            --info: #2f7fd1;
            --border: #e2e5ee;
        }}
        * {{ box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.5;
            margin: 0;
        }}
        .container {{ max-width: 1600px; margin: 0 auto; padding: 20px; }}
        .card {{
            background: var(--bg-card);
            border: 1px solid var(--border);
            border-radius: 10px;
            padding: 20px;
            margin-bottom: 20px;
        }}
        .columns {{ display: grid; grid-template-columns: 3fr 2fr; gap: 40px; }}
        .notice {{ padding: 12px 16px; border-radius: 8px; margin-bottom: 16px; color: white; }}
        .notice.success {{ background: var(--success); }}
        .notice.error {{ background: var(--error); }}
        .notice.info {{ background: var(--info); }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ padding: 8px; text-align: left; border-bottom: 1px solid var(--border); }}
        th {{ color: var(--text-secondary); font-weight: 500; }}
        textarea, select, input[type=text] {{ width: 100%; padding: 8px; font: inherit; }}
        .button {{
            display: inline-block;
            background: var(--accent);
            color: white;
            border: none;
            border-radius: 6px;
            padding: 8px 16px;
            text-decoration: none;
            cursor: pointer;
        }}
        .muted {{ color: var(--text-secondary); font-size: 0.9em; }}
        label.check {{ display: block; }}
    </style>
</head>
<body>
    <main class="container">
        {}
    </main>
</body>
</html>"#, html_escape(title), content)
}

/// Render the main annotation page
pub fn render_index(
    session: &Session,
    config: &AppConfig,
    viewer: &dyn PdfViewer,
    requested: Option<&str>,
    notices: &[Notice],
) -> String {
    let notices_html: String = notices
        .iter()
        .map(|n| format!(r#"<div class="notice {}">{}</div>"#, n.class(), html_escape(n.message())))
        .collect();

    let selection_html = match session.selectable() {
        Selection::NoDocuments => String::new(),
        Selection::Complete => {
            r#"<div class="notice info">All documents have been annotated!</div>"#.to_string()
        }
        Selection::Available(names) => match session.current(requested) {
            Some((index, doc)) => format!(
                "{}{}",
                render_selector(&names, doc.name()),
                render_document(index, doc, session, config, viewer)
            ),
            None => String::new(),
        },
    };

    let content = format!(r#"
        <h1>Document Classification Annotator</h1>
        <p>Upload documents and annotate them with labels and comments.</p>
        {}
        {}
        {}
        {}
        {}
        {}
        {}
    "#,
        notices_html,
        render_catalog(session.catalog()),
        render_instructions(session.mode()),
        render_upload(session),
        render_filter(session.show_unannotated_only()),
        selection_html,
        render_export(session.store().all(), session.mode()),
    );

    base_template("Annotate", &content)
}

/// Render a standalone error page
pub fn render_error(message: &str) -> String {
    let content = format!(r#"
        <h1>Something went wrong</h1>
        <div class="notice error">{}</div>
        <a class="button" href="/">Back</a>
    "#, html_escape(message));

    base_template("Error", &content)
}

fn render_catalog(catalog: &LabelCatalog) -> String {
    let items: String = catalog
        .entries()
        .iter()
        .map(|e| format!("<li><strong>{}</strong>: {}</li>", html_escape(&e.name), html_escape(&e.description)))
        .collect();

    format!(r#"
        <div class="card">
            <h2>Available Document Classes</h2>
            <details>
                <summary>Click here to see available document classes</summary>
                <ul>{}</ul>
            </details>
        </div>
    "#, items)
}

fn render_instructions(mode: LabelMode) -> String {
    let pick = match mode {
        LabelMode::Multi => "choose one or more labels",
        LabelMode::Single => "choose a label",
    };
    let custom = match mode {
        LabelMode::Multi => "Optionally, add a custom label and comments.",
        LabelMode::Single => "Optionally, add comments.",
    };

    format!(r#"
        <div class="notice info">
            1. Upload your document(s).
            2. Select one document at a time from the list.
            3. View the preview and {}.
            4. {}
            5. Save your annotation.
            6. Download all annotations as CSV.
        </div>
    "#, pick, custom)
}

fn render_upload(session: &Session) -> String {
    let annotated = session.store().annotated_names();
    let rows: String = session
        .documents()
        .iter()
        .map(|d| {
            format!(r#"
                <tr>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>
                        <form method="post" action="/documents/remove">
                            <input type="hidden" name="name" value="{}">
                            <button class="button" type="submit">Remove</button>
                        </form>
                    </td>
                </tr>
            "#,
                html_escape(d.name()),
                d.kind().mime_type(),
                format_size(d.size()),
                if annotated.contains(d.name()) { "annotated" } else { "pending" },
                html_escape(d.name()),
            )
        })
        .collect();

    let table = if rows.is_empty() {
        String::new()
    } else {
        format!(r#"
            <table>
                <tr><th>Name</th><th>Type</th><th>Size</th><th>Status</th><th></th></tr>
                {}
            </table>
        "#, rows)
    };

    format!(r#"
        <div class="card">
            <h2>Upload your documents</h2>
            <form method="post" action="/upload" enctype="multipart/form-data">
                <input type="file" name="documents" multiple accept=".txt,.pdf,text/plain,application/pdf">
                <button class="button" type="submit">Upload</button>
                <p class="muted">Upload text or PDF files for annotation.</p>
            </form>
            {}
        </div>
    "#, table)
}

fn render_filter(show_unannotated_only: bool) -> String {
    format!(r#"
        <form method="post" action="/filter">
            <label class="check">
                <input type="checkbox" name="show_unannotated_only" value="on" {} onchange="this.form.submit()">
                Show only unannotated documents
            </label>
            <noscript><button class="button" type="submit">Apply</button></noscript>
        </form>
    "#, if show_unannotated_only { "checked" } else { "" })
}

fn render_selector(names: &[&str], current: &str) -> String {
    let options: String = names
        .iter()
        .map(|n| {
            format!(
                r#"<option value="{0}"{1}>{0}</option>"#,
                html_escape(n),
                if *n == current { " selected" } else { "" }
            )
        })
        .collect();

    format!(r#"
        <form method="get" action="/" class="card">
            <label for="doc">Select a document to annotate</label>
            <select id="doc" name="doc" onchange="this.form.submit()">{}</select>
            <noscript><button class="button" type="submit">Open</button></noscript>
        </form>
    "#, options)
}

fn render_document(
    index: usize,
    doc: &UploadedDocument,
    session: &Session,
    config: &AppConfig,
    viewer: &dyn PdfViewer,
) -> String {
    let preview_html = match render_preview(index, doc, &config.preview, viewer) {
        Preview::Text { content, rows } => format!(
            r#"<textarea rows="{}" readonly>{}</textarea>"#,
            rows,
            html_escape(&content)
        ),
        Preview::Pdf { markup } => markup,
        Preview::Unavailable { message } => {
            format!(r#"<div class="notice error">{}</div>"#, html_escape(&message))
        }
    };

    format!(r#"
        <div class="card">
            <h2>{}</h2>
            <div class="columns">
                <div>
                    <h3>Document Preview</h3>
                    {}
                </div>
                <div>
                    <h3>Annotation</h3>
                    {}
                </div>
            </div>
        </div>
    "#,
        html_escape(doc.name()),
        preview_html,
        render_form(doc.name(), session.catalog(), session.mode()),
    )
}

fn render_form(document: &str, catalog: &LabelCatalog, mode: LabelMode) -> String {
    let labels_html = match mode {
        LabelMode::Multi => {
            let checks: String = catalog
                .names()
                .map(|n| {
                    format!(
                        r#"<label class="check"><input type="checkbox" name="labels" value="{0}"> {0}</label>"#,
                        html_escape(n)
                    )
                })
                .collect();
            format!(r#"
                <p>Select one or more categories</p>
                {}
                <p><label for="custom_label">Custom Label (optional)</label>
                <input type="text" id="custom_label" name="custom_label"></p>
            "#, checks)
        }
        LabelMode::Single => {
            let options: String = catalog
                .names()
                .map(|n| format!(r#"<option value="{0}">{0}</option>"#, html_escape(n)))
                .collect();
            format!(r#"
                <p><label for="label">Select a category</label>
                <select id="label" name="label">{}</select></p>
            "#, options)
        }
    };

    format!(r#"
        <form method="post" action="/annotate" enctype="multipart/form-data">
            <input type="hidden" name="document" value="{}">
            {}
            <p><label for="comment">Additional Comments</label>
            <textarea id="comment" name="comment" rows="5"></textarea></p>
            <button class="button" type="submit">Save Annotation</button>
        </form>
    "#, html_escape(document), labels_html)
}

fn render_export(records: &[AnnotationRecord], mode: LabelMode) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows: String = records
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&r.document),
                html_escape(&r.labels.joined()),
                html_escape(&r.comment),
                r.saved_at.format("%Y-%m-%d %H:%M:%S"),
            )
        })
        .collect();

    format!(r#"
        <div class="card">
            <h2>Saved annotations ({})</h2>
            <table>
                <tr><th>Document</th><th>{}</th><th>Comment</th><th>Saved</th></tr>
                {}
            </table>
            <p><a class="button" href="/export.csv">Download Annotations as CSV</a></p>
        </div>
    "#, records.len(), if mode == LabelMode::Multi { "Labels" } else { "Label" }, rows)
}

fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationForm;
    use crate::preview::EmbedViewer;
    use crate::session::UploadPart;

    fn session(mode: LabelMode) -> Session {
        let mut session = Session::new(mode, LabelCatalog::default(), true);
        session.upload(vec![
            UploadPart {
                name: "good.txt".to_string(),
                mime: Some("text/plain".to_string()),
                bytes: b"<b>hello</b>".to_vec(),
            },
            UploadPart {
                name: "bad.txt".to_string(),
                mime: Some("text/plain".to_string()),
                bytes: vec![0xff, 0xfe, 0xfd],
            },
        ]);
        session
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & \"b\""), "a &amp; &quot;b&quot;");
    }

    #[test]
    fn test_text_preview_is_escaped() {
        let page = render_index(&session(LabelMode::Multi), &AppConfig::default(), &EmbedViewer, None, &[]);
        assert!(page.contains("&lt;b&gt;hello&lt;/b&gt;"));
        assert!(!page.contains("<b>hello</b>"));
    }

    #[test]
    fn test_decode_error_only_affects_that_document() {
        let session = session(LabelMode::Multi);
        let page = render_index(&session, &AppConfig::default(), &EmbedViewer, Some("bad.txt"), &[]);
        assert!(page.contains("Cannot display this text file"));
        // Both documents still listed and selectable
        assert!(page.contains(r#"<option value="good.txt">good.txt</option>"#));
        assert!(page.contains(r#"<option value="bad.txt" selected>bad.txt</option>"#));
    }

    #[test]
    fn test_form_follows_mode() {
        let multi = render_index(&session(LabelMode::Multi), &AppConfig::default(), &EmbedViewer, None, &[]);
        assert!(multi.contains(r#"name="labels""#));
        assert!(multi.contains(r#"name="custom_label""#));

        let single = render_index(&session(LabelMode::Single), &AppConfig::default(), &EmbedViewer, None, &[]);
        assert!(single.contains(r#"name="label""#));
        assert!(!single.contains(r#"name="custom_label""#));
    }

    #[test]
    fn test_completion_and_download_link() {
        let mut session = session(LabelMode::Multi);
        let page = render_index(&session, &AppConfig::default(), &EmbedViewer, None, &[]);
        assert!(!page.contains("/export.csv"));

        session.save(AnnotationForm::new("good.txt")).unwrap();
        session.save(AnnotationForm::new("bad.txt")).unwrap();

        let page = render_index(&session, &AppConfig::default(), &EmbedViewer, None, &[]);
        assert!(page.contains("All documents have been annotated!"));
        assert!(page.contains("/export.csv"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
