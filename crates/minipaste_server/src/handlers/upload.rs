//! Upload endpoints: raw-body `PUT /:name` and form `POST /`.

use super::request::{header_text, log_client};
use crate::{error::HttpError, AppState};
use axum::{
    body::Body,
    extract::{ConnectInfo, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use minipaste_core::{BodyUpload, FormUpload, MultipartUploadPipeline, UploadPipeline};
use std::net::SocketAddr;

/// Accept a raw-body upload named by the path segment.
///
/// # Returns
/// `303 See Other` pointing at `/paste`.
///
/// # Errors
/// Returns an error when the headers or body fail validation.
pub async fn put_upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, HttpError> {
    log_client("upload", &headers, peer.as_ref());

    let content_type = header_text(&headers, header::CONTENT_TYPE);
    let content_length = header_text(&headers, header::CONTENT_LENGTH);
    let pipeline = UploadPipeline::new(state.store.clone(), state.config.upload_limit);
    pipeline
        .submit(
            BodyUpload {
                name: &name,
                content_type: content_type.as_deref(),
                content_length: content_length.as_deref(),
            },
            body.into_data_stream(),
        )
        .await?;

    Ok(redirect_to_paste(&state, &headers))
}

/// Accept a `multipart/form-data` upload whose first part is `file`.
///
/// # Returns
/// `303 See Other` pointing at `/paste`.
///
/// # Errors
/// Returns an error when the envelope, its first field, or its size is rejected.
pub async fn form_upload(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, HttpError> {
    log_client("form upload", &headers, peer.as_ref());

    let content_type = header_text(&headers, header::CONTENT_TYPE);
    let content_length = header_text(&headers, header::CONTENT_LENGTH);
    let pipeline = MultipartUploadPipeline::new(state.store.clone(), state.config.upload_limit);
    pipeline
        .submit(
            FormUpload {
                content_type: content_type.as_deref(),
                content_length: content_length.as_deref(),
            },
            body.into_data_stream(),
        )
        .await?;

    Ok(redirect_to_paste(&state, &headers))
}

/// URL clients should fetch the paste from, echoing the request's `Host`.
pub(crate) fn paste_url(state: &AppState, headers: &HeaderMap) -> String {
    let host = header_text(headers, header::HOST)
        .map(|host| host.trim().to_string())
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| state.config.bind.to_string());
    format!("http://{}/paste", host)
}

fn redirect_to_paste(state: &AppState, headers: &HeaderMap) -> Response {
    let location = paste_url(state, headers);
    let mut response = (StatusCode::SEE_OTHER, format!("{}\n", location)).into_response();
    match HeaderValue::from_str(&location) {
        Ok(value) => {
            response.headers_mut().insert(header::LOCATION, value);
        }
        Err(err) => tracing::warn!("Skipping unrepresentable Location {:?}: {}", location, err),
    }
    response
}
