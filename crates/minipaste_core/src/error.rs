//! Error types for upload ingestion and paste retrieval.
use thiserror::Error;

/// Boxed error carried from a failing body stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures surfaced by the upload pipelines and the store.
///
/// None of these mutate store state; a failed upload leaves the previous
/// paste (if any) in place.
#[derive(Error, Debug)]
pub enum PasteError {
    #[error("garbage content type")]
    InvalidContentType,

    #[error("missing content length")]
    MissingLength,

    #[error("garbage content length")]
    InvalidLength,

    #[error("upload exceeds size limit of {limit} bytes")]
    LengthExceedsLimit { limit: u64 },

    #[error("upload body exceeded size limit of {limit} bytes")]
    UploadTooLarge { limit: u64 },

    #[error("upload failed: {0}")]
    Io(#[source] BoxError),

    #[error("submitted form was corrupt")]
    CorruptSubmission,

    #[error("submitted form contains unsupported fields")]
    UnsupportedField,

    #[error("no paste present; the previous paste likely expired")]
    NoArtifact,
}
