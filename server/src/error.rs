//! API errors mapped to HTTP status codes with a `{"error": "message"}` body.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tfidf_core::SearchError;

#[derive(Debug)]
pub enum ApiError {
    /// Invalid request body or parameters (400).
    BadRequest(String),
    /// Unknown document (404).
    NotFound(String),
    /// The engine is not in the state the request needs (409).
    Conflict(String),
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::NotIndexed => ApiError::Conflict(err.to_string()),
            SearchError::EmptyQuery | SearchError::UnknownMethod(_) | SearchError::InvalidDocument(_) => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(format!("malformed upload: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
