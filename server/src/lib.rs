pub mod error;

use axum::extract::{Multipart, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tfidf_core::{Document, Posting, SearchEngine, SearchError, SimilarityMethod};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Multipart field that carries uploaded files.
pub const UPLOAD_FIELD: &str = "files";

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub documents: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub index: BTreeMap<String, Vec<Posting>>,
    pub terms_count: usize,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    /// `cosine` when omitted.
    #[serde(default)]
    pub similarity_method: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Serialize)]
pub struct SearchResult {
    pub document: String,
    pub score: f64,
    pub content: String,
}

#[derive(Serialize)]
pub struct DocumentResponse {
    pub document: String,
    pub content: String,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub preview_chars: usize,
}

pub fn build_app(engine: Arc<SearchEngine>, preview_chars: usize) -> Router {
    let state = AppState { engine, preview_chars };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/upload", post(upload_handler))
        .route("/api/index", post(index_handler))
        .route("/api/search", post(search_handler))
        .route("/api/documents/:id", get(document_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn is_text_file(name: &str) -> bool {
    std::path::Path::new(name).extension().and_then(|e| e.to_str()) == Some("txt")
}

/// First `max_chars` characters, with `...` appended when the text was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => format!("{}...", &text[..byte]),
        None => text.to_string(),
    }
}

/// `multipart/form-data` upload. Every `files` part is one document named by its file name;
/// parts that are not `.txt` or not UTF-8 are skipped.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut received = 0usize;
    let mut documents = Vec::new();
    let mut skipped = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        received += 1;
        let filename = field.file_name().unwrap_or_default().to_string();
        if !is_text_file(&filename) {
            tracing::warn!(file = %filename, "skipping non-.txt upload");
            skipped.push(filename);
            continue;
        }
        let bytes = field.bytes().await?;
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => documents.push(Document::new(filename, text)),
            Err(_) => {
                tracing::warn!(file = %filename, "skipping upload that is not valid UTF-8");
                skipped.push(filename);
            }
        }
    }
    if received == 0 {
        return Err(ApiError::BadRequest("no files uploaded".into()));
    }

    let report = state.engine.ingest(documents);
    skipped.extend(report.rejected.into_iter().map(|(id, _)| id));

    Ok(Json(UploadResponse {
        message: format!("{} files loaded", report.accepted.len()),
        documents: report.accepted,
        skipped,
    }))
}

pub async fn index_handler(State(state): State<AppState>) -> Json<IndexResponse> {
    let snapshot = state.engine.build();
    let report = snapshot.report();
    tracing::debug!(documents = report.document_count, terms = report.term_count, "index requested");
    Json(IndexResponse {
        message: "indexing complete".into(),
        terms_count: report.term_count,
        index: snapshot.postings(),
    })
}

pub async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let method = match req.similarity_method.as_deref() {
        Some(name) => name.parse::<SimilarityMethod>()?,
        None => SimilarityMethod::default(),
    };
    if req.query.trim().is_empty() {
        return Err(SearchError::EmptyQuery.into());
    }
    // Ranking and previews come from the same published index, even if an upload lands mid-request.
    let snapshot = state.engine.snapshot()?;
    let hits = snapshot.search(&req.query, method)?;

    let results = hits
        .into_iter()
        .map(|hit| {
            let content = snapshot
                .document(&hit.document)
                .map(|text| preview(text, state.preview_chars))
                .unwrap_or_default();
            SearchResult { document: hit.document, score: hit.score, content }
        })
        .collect();
    Ok(Json(SearchResponse { results }))
}

pub async fn document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    match state.engine.document(&id) {
        Some(content) => Ok(Json(DocumentResponse { document: id, content })),
        None => Err(ApiError::NotFound(format!("document {id} not found"))),
    }
}
