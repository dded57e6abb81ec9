//! Download and deletion of the single stored paste.

use super::request::log_client;
use crate::{error::HttpError, AppState};
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use minipaste_core::{ClearCause, PasteError, GENERIC_CONTENT_TYPE};
use serde_json::{json, Value};
use std::net::SocketAddr;

/// Serve the current paste with its stored type and a download filename.
///
/// # Returns
/// The paste bytes, or `304 Not Modified` when `If-Modified-Since` is current.
///
/// # Errors
/// Returns `410 Gone` when no paste is stored.
pub async fn get_paste(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    log_client("download", &headers, peer.as_ref());

    let artifact = state.store.get().ok_or(PasteError::NoArtifact)?;
    let last_modified = http_date(artifact.uploaded_at());

    if not_modified_since(&headers, artifact.uploaded_at()) {
        return Ok((
            StatusCode::NOT_MODIFIED,
            [(header::LAST_MODIFIED, last_modified)],
        )
            .into_response());
    }

    let mut response = Response::new(Body::from(artifact.content().clone()));
    let response_headers = response.headers_mut();
    let content_type = HeaderValue::from_str(artifact.content_type())
        .unwrap_or_else(|_| HeaderValue::from_static(GENERIC_CONTENT_TYPE));
    response_headers.insert(header::CONTENT_TYPE, content_type);
    if let Ok(value) = HeaderValue::from_str(&last_modified) {
        response_headers.insert(header::LAST_MODIFIED, value);
    }
    match HeaderValue::from_str(&content_disposition(artifact.name())) {
        Ok(value) => {
            response_headers.insert(header::CONTENT_DISPOSITION, value);
        }
        Err(err) => tracing::warn!("Skipping Content-Disposition for {:?}: {}", artifact.name(), err),
    }

    Ok(response)
}

/// Remove the current paste, if any.
///
/// # Returns
/// `{"deleted": true}` when a paste was removed, `{"deleted": false}` otherwise.
pub async fn delete_paste(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Json<Value> {
    log_client("delete", &headers, peer.as_ref());
    let deleted = state.store.clear(ClearCause::Request);
    Json(json!({ "deleted": deleted }))
}

/// Format a timestamp as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`).
pub(crate) fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn not_modified_since(headers: &HeaderMap, uploaded_at: DateTime<Utc>) -> bool {
    let Some(since) = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| DateTime::parse_from_rfc2822(value.trim()).ok())
    else {
        return false;
    };
    // HTTP dates carry whole seconds only.
    uploaded_at.timestamp() <= since.timestamp()
}

fn content_disposition(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == '"' || c == '\\' { '_' } else { c })
        .collect();
    format!("filename=\"{}\"", sanitized)
}
