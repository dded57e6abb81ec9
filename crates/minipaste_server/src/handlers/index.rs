//! Index page and health probe.

use crate::{error::HttpError, AppState};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use minipaste_core::detection::{sniff_content_type, TEXT_PLAIN};
use std::path::Path;

const DEFAULT_INDEX: &str = include_str!("../../assets/README.md");
const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";
const TEXT_HTML_UTF8: &str = "text/html; charset=utf-8";

/// Liveness probe; always `200 OK` with an empty body.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Serve the configured index file, or the built-in usage page when it is missing.
///
/// # Returns
/// The index document with a content type derived from its extension or bytes.
///
/// # Errors
/// Returns an internal error when the index file exists but cannot be read.
pub async fn index(State(state): State<AppState>) -> Result<Response, HttpError> {
    let path = state.config.index_path.as_path();
    match tokio::fs::read(path).await {
        Ok(content) => {
            let content_type = index_content_type(path, &content);
            Ok(([(header::CONTENT_TYPE, content_type)], content).into_response())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Ok(([(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)], DEFAULT_INDEX).into_response())
        }
        Err(err) => Err(HttpError::Internal(format!(
            "failed to read index {}: {}",
            path.display(),
            err
        ))),
    }
}

fn index_content_type(path: &Path, content: &[u8]) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html") | Some("htm") => TEXT_HTML_UTF8,
        Some("css") => "text/css; charset=utf-8",
        Some("txt") | Some("md") => TEXT_PLAIN_UTF8,
        _ => match sniff_content_type(content) {
            TEXT_PLAIN => TEXT_PLAIN_UTF8,
            "text/html" => TEXT_HTML_UTF8,
            sniffed => sniffed,
        },
    }
}
