//! Upload ingestion: validation, bounded reading, and the two pipeline variants.
//!
//! Both pipelines share the pure validators in [`validate`] and the reader in
//! [`reader`]; they differ only in how the declared metadata and body are
//! pulled out of the submission. Any failure returns before the store is
//! touched.

mod multipart;
/// Memory-bounded body reading.
pub mod reader;
mod upload;
/// Declared content-type and content-length validation.
pub mod validate;

pub use multipart::{read_form_submission, FormUpload, MultipartUploadPipeline};
pub use reader::read_bounded;
pub use upload::{read_body_submission, BodyUpload, UploadPipeline};
pub use validate::{normalize_content_type, validate_length};
