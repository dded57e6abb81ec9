//! Raw-body upload pipeline (`PUT /:name` style).

use super::{read_bounded, validate};
use crate::error::{BoxError, PasteError};
use crate::models::artifact::{Artifact, Submission, UploadMethod};
use crate::store::PasteStore;
use bytes::Bytes;
use futures_util::Stream;
use std::sync::Arc;

/// Declared metadata accompanying a raw-body upload.
#[derive(Debug, Clone, Copy)]
pub struct BodyUpload<'a> {
    /// Target name from the request path.
    pub name: &'a str,
    pub content_type: Option<&'a str>,
    pub content_length: Option<&'a str>,
}

/// Validate and read a raw-body upload without touching any store.
///
/// # Errors
/// Any validator or reader failure; see [`validate`] and [`read_bounded`].
pub async fn read_body_submission<S, E>(
    upload: BodyUpload<'_>,
    body: S,
    limit: u64,
) -> Result<Submission, PasteError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let content_type = validate::normalize_content_type(upload.content_type)?;
    let declared_length = validate::validate_length(upload.content_length, limit)?;
    let content = read_bounded(body, limit, declared_length).await?;
    Ok(Submission {
        name: upload.name.to_string(),
        content_type,
        content,
    })
}

/// Raw-body upload pipeline bound to a store and an upload ceiling.
#[derive(Clone)]
pub struct UploadPipeline {
    store: PasteStore,
    limit: u64,
}

impl UploadPipeline {
    pub fn new(store: PasteStore, limit: u64) -> Self {
        Self { store, limit }
    }

    /// Ingest one raw-body upload and install it as the current paste.
    ///
    /// # Returns
    /// The accepted [`Artifact`].
    ///
    /// # Errors
    /// Returns the classified failure; the store is left unchanged.
    pub async fn submit<S, E>(
        &self,
        upload: BodyUpload<'_>,
        body: S,
    ) -> Result<Arc<Artifact>, PasteError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<BoxError>,
    {
        let submission = read_body_submission(upload, body, self.limit).await?;
        Ok(self.store.replace(UploadMethod::Put, submission))
    }
}
