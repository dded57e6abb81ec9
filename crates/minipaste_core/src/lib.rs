//! Core domain library for MiniPaste (single-slot store, upload ingestion, config).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across MiniPaste crates.
pub mod constants;
/// Content-type sniffing from leading bytes.
pub mod detection;
/// Process-global environment mutation helpers.
pub mod env;
/// Domain error types for ingestion and retrieval.
pub mod error;
/// Upload validation, bounded reading, and the two upload pipelines.
pub mod ingest;
/// Artifact data model.
pub mod models;
/// Artifact naming helpers.
pub mod naming;
/// Single-slot paste store with retention timer.
pub mod store;

pub use config::Config;
pub use constants::{
    DEFAULT_BIND, DEFAULT_CLI_SERVER_URL, DEFAULT_RETENTION, DEFAULT_UPLOAD_LIMIT,
    GENERIC_CONTENT_TYPE, UNNAMED,
};
pub use error::{BoxError, PasteError};
pub use ingest::{BodyUpload, FormUpload, MultipartUploadPipeline, UploadPipeline};
pub use models::artifact::{Artifact, Submission, UploadMethod};
pub use store::{ClearCause, PasteStore};
