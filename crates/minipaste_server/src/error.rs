//! HTTP error mapping for handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use minipaste_core::PasteError;
use serde_json::json;
use thiserror::Error;

/// Error returned by handlers; rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error(transparent)]
    Paste(#[from] PasteError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HttpError {
    /// Status code a client sees for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Paste(err) => match err {
                PasteError::InvalidContentType
                | PasteError::MissingLength
                | PasteError::InvalidLength
                | PasteError::CorruptSubmission
                | PasteError::UnsupportedField => StatusCode::BAD_REQUEST,
                PasteError::LengthExceedsLimit { .. } | PasteError::UploadTooLarge { .. } => {
                    StatusCode::PAYLOAD_TOO_LARGE
                }
                PasteError::NoArtifact => StatusCode::GONE,
                PasteError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Paste(PasteError::Io(details)) => {
                tracing::error!("Upload failed: {}", details);
                "upload failed".to_string()
            }
            Self::Paste(PasteError::NoArtifact) => self.to_string(),
            Self::Paste(err) => {
                tracing::warn!("Upload rejected: {}", err);
                err.to_string()
            }
            Self::Internal(details) => {
                tracing::error!("Internal error: {}", details);
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
