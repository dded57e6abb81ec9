//! Multipart form upload pipeline (`POST /` with a `file` field).

use super::{read_bounded, validate};
use crate::constants::{FORM_FILE_FIELD, UNNAMED};
use crate::error::{BoxError, PasteError};
use crate::models::artifact::{Artifact, Submission, UploadMethod};
use crate::store::PasteStore;
use bytes::Bytes;
use futures_util::Stream;
use std::sync::Arc;

/// Declared metadata accompanying a multipart submission.
#[derive(Debug, Clone, Copy)]
pub struct FormUpload<'a> {
    /// Request content type; carries the multipart boundary.
    pub content_type: Option<&'a str>,
    /// Declared length of the whole multipart body.
    pub content_length: Option<&'a str>,
}

/// Validate and read the first form part without touching any store.
///
/// Only the first part is consumed. It must be named `file`; later parts are
/// neither read nor validated.
///
/// # Errors
/// - Length failures from [`validate::validate_length`], checked before any
///   body byte is read.
/// - [`PasteError::CorruptSubmission`] for a missing boundary, a malformed
///   envelope, or a form without parts.
/// - [`PasteError::UnsupportedField`] when the first part is not `file`.
/// - Content-type and reader failures for the part itself.
pub async fn read_form_submission<S, E>(
    upload: FormUpload<'_>,
    body: S,
    limit: u64,
) -> Result<Submission, PasteError>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<BoxError> + 'static,
{
    let declared_length = validate::validate_length(upload.content_length, limit)?;
    let boundary = upload
        .content_type
        .and_then(|value| multer::parse_boundary(value).ok())
        .ok_or(PasteError::CorruptSubmission)?;

    let mut form = multer::Multipart::new(body, boundary);
    let field = form
        .next_field()
        .await
        .map_err(|_| PasteError::CorruptSubmission)?
        .ok_or(PasteError::CorruptSubmission)?;

    if field.name() != Some(FORM_FILE_FIELD) {
        return Err(PasteError::UnsupportedField);
    }

    let declared_type = field
        .headers()
        .get("content-type")
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    let content_type = validate::normalize_content_type(declared_type.as_deref())?;
    let name = field
        .file_name()
        .map(base_name)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNNAMED)
        .to_string();

    let content = read_bounded(field, limit, declared_length).await?;
    Ok(Submission {
        name,
        content_type,
        content,
    })
}

/// Strip any directory components a client put into the part filename.
fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name)
}

/// Multipart upload pipeline bound to a store and an upload ceiling.
#[derive(Clone)]
pub struct MultipartUploadPipeline {
    store: PasteStore,
    limit: u64,
}

impl MultipartUploadPipeline {
    pub fn new(store: PasteStore, limit: u64) -> Self {
        Self { store, limit }
    }

    /// Ingest one multipart submission and install its file as the current paste.
    ///
    /// # Returns
    /// The accepted [`Artifact`].
    ///
    /// # Errors
    /// Returns the classified failure; the store is left unchanged.
    pub async fn submit<S, E>(
        &self,
        upload: FormUpload<'_>,
        body: S,
    ) -> Result<Arc<Artifact>, PasteError>
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        let submission = read_form_submission(upload, body, self.limit).await?;
        Ok(self.store.replace(UploadMethod::Form, submission))
    }
}
