// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Web UI for the document annotator

pub mod pages;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::annotation::{AnnotationForm, AnnotationRecord};
use crate::catalog::LabelCatalogEntry;
use crate::config::AppConfig;
use crate::document::DocumentSummary;
use crate::export::CSV_CONTENT_TYPE;
use crate::preview::{EmbedViewer, PdfViewer};
use crate::session::{Session, UploadPart};
use crate::{AnnotatorError, Result};

use pages::Notice;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    session: Mutex<Session>,
    notices: Mutex<Vec<Notice>>,
    viewer: Box<dyn PdfViewer>,
}

impl AppState {
    /// Start a fresh session for this config
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: Mutex::new(Session::from_config(&config)),
            notices: Mutex::new(Vec::new()),
            viewer: Box::new(EmbedViewer),
            config,
        }
    }

    /// Replace the PDF viewer
    pub fn with_viewer(mut self, viewer: Box<dyn PdfViewer>) -> Self {
        self.viewer = viewer;
        self
    }

    fn session(&self) -> Result<MutexGuard<'_, Session>> {
        self.session
            .lock()
            .map_err(|_| AnnotatorError::Server("Session lock poisoned".to_string()))
    }

    /// Queue a message for the next page render
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }

    fn take_notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }
}

/// Create the web application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.web.max_upload_bytes;

    Router::new()
        // Pages
        .route("/", get(index_page))
        .route("/upload", post(upload_documents))
        .route("/documents/remove", post(remove_document))
        .route("/documents/:index/raw", get(document_raw))
        .route("/filter", post(set_filter))
        .route("/annotate", post(save_annotation))
        .route("/export.csv", get(export_csv))
        // API endpoints
        .route("/api/catalog", get(api_get_catalog))
        .route("/api/documents", get(api_get_documents))
        .route("/api/annotations", get(api_get_annotations))
        .route("/api/status", get(api_get_status))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl IntoResponse for AnnotatorError {
    fn into_response(self) -> Response {
        let status = match &self {
            AnnotatorError::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            AnnotatorError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("{}", self);
        }
        (status, Html(pages::render_error(&self.to_string()))).into_response()
    }
}

fn upload_error(e: axum::extract::multipart::MultipartError) -> AnnotatorError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AnnotatorError::UploadTooLarge(e.body_text())
    } else {
        AnnotatorError::Upload(e.body_text())
    }
}

// === Page Handlers ===

#[derive(Deserialize)]
struct IndexQuery {
    doc: Option<String>,
}

async fn index_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>> {
    let notices = state.take_notices();
    let session = state.session()?;
    Ok(Html(pages::render_index(
        &session,
        &state.config,
        state.viewer.as_ref(),
        query.doc.as_deref(),
        &notices,
    )))
}

async fn upload_documents(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        // The file picker sends an empty part when nothing was chosen
        let Some(name) = field.file_name().filter(|n| !n.is_empty()).map(str::to_string) else {
            continue;
        };
        let mime = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(upload_error)?;
        parts.push(UploadPart {
            name,
            mime,
            bytes: bytes.to_vec(),
        });
    }

    let report = state.session()?.upload(parts);

    if !report.accepted.is_empty() {
        state.notify(Notice::Success(format!("Uploaded {} document(s)", report.accepted.len())));
    }
    for (name, reason) in report.rejected {
        state.notify(Notice::Error(format!("Skipped {}: {}", name, reason)));
    }

    Ok(Redirect::to("/"))
}

#[derive(Deserialize)]
struct RemoveForm {
    name: String,
}

async fn remove_document(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RemoveForm>,
) -> Result<Redirect> {
    state
        .session()?
        .remove_document(&form.name)
        .ok_or(AnnotatorError::DocumentNotFound(form.name))?;
    Ok(Redirect::to("/"))
}

async fn document_raw(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Response> {
    let session = state.session()?;
    let doc = session
        .document_at(index)
        .ok_or_else(|| AnnotatorError::DocumentNotFound(format!("#{}", index)))?;

    Ok((
        [(header::CONTENT_TYPE, doc.kind().mime_type())],
        doc.bytes().to_vec(),
    )
        .into_response())
}

#[derive(Deserialize)]
struct FilterForm {
    /// Checkboxes are only submitted when ticked
    show_unannotated_only: Option<String>,
}

async fn set_filter(
    State(state): State<Arc<AppState>>,
    Form(form): Form<FilterForm>,
) -> Result<Redirect> {
    state
        .session()?
        .set_show_unannotated_only(form.show_unannotated_only.is_some());
    Ok(Redirect::to("/"))
}

async fn save_annotation(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let mut form = AnnotationForm::default();
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.map_err(upload_error)?;
        match name.as_str() {
            "document" => form.document = value,
            "labels" | "label" => form.selected.push(value),
            "custom_label" => form.custom_label = value,
            "comment" => form.comment = value,
            _ => {}
        }
    }

    let document = form.document.clone();
    {
        let mut session = state.session()?;
        if session.find_document(&document).is_none() {
            return Err(AnnotatorError::DocumentNotFound(document));
        }
        session.save(form)?;
    }

    state.notify(Notice::Success(format!("Annotation saved for {}!", document)));
    Ok(Redirect::to(&format!("/?doc={}", urlencoding::encode(&document))))
}

async fn export_csv(State(state): State<Arc<AppState>>) -> Result<Response> {
    let session = state.session()?;
    let Some(csv) = session.export_csv() else {
        return Ok((StatusCode::NOT_FOUND, "No annotations to export").into_response());
    };

    info!("Exported {} annotation(s)", session.store().len());
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", state.config.export.filename),
            ),
        ],
        csv,
    )
        .into_response())
}

// === API Handlers ===

async fn api_get_catalog(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LabelCatalogEntry>>> {
    Ok(Json(state.session()?.catalog().entries().to_vec()))
}

async fn api_get_documents(State(state): State<Arc<AppState>>) -> Result<Json<Vec<DocumentSummary>>> {
    Ok(Json(state.session()?.summaries()))
}

async fn api_get_annotations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<AnnotationRecord>>> {
    Ok(Json(state.session()?.store().all().to_vec()))
}

#[derive(Serialize)]
struct StatusResponse {
    uploaded: usize,
    annotated: usize,
    remaining: usize,
    records: usize,
    mode: &'static str,
    show_unannotated_only: bool,
}

async fn api_get_status(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>> {
    let session = state.session()?;
    let summaries = session.summaries();
    let annotated = summaries.iter().filter(|s| s.annotated).count();

    Ok(Json(StatusResponse {
        uploaded: summaries.len(),
        annotated,
        remaining: summaries.len() - annotated,
        records: session.store().len(),
        mode: session.mode().as_str(),
        show_unannotated_only: session.show_unannotated_only(),
    }))
}

/// Start the web server with a fresh session
pub async fn start_server(config: AppConfig) -> crate::Result<()> {
    let addr = format!("{}:{}", config.web.host, config.web.port);
    let state = Arc::new(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Web UI available at http://{}", addr);

    let router = create_router(state);
    axum::serve(listener, router)
        .await
        .map_err(|e| AnnotatorError::Server(format!("Server error: {}", e)))?;

    info!("Session ended");
    Ok(())
}
