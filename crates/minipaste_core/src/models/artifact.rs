//! Artifact (the single stored paste) and its pre-store submission form.

use crate::constants::{GENERIC_CONTENT_TYPE, UNNAMED};
use crate::{detection, naming};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;

/// Which upload protocol produced a submission. Only used for audit logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMethod {
    /// Raw request body, name taken from the request path.
    Put,
    /// Multipart form with a single `file` field.
    Form,
}

impl UploadMethod {
    /// Audit tag for this method.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Put => "put",
            Self::Form => "0x0",
        }
    }
}

impl fmt::Display for UploadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated upload produced by a pipeline, not yet accepted by the store.
///
/// `content_type` is already parameter-stripped but may still be the generic
/// binary type; `name` may still be the [`UNNAMED`] sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub content_type: String,
    pub content: Bytes,
}

/// The paste currently held by the store. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    name: String,
    content_type: String,
    content: Bytes,
    uploaded_at: DateTime<Utc>,
}

impl Artifact {
    /// Finalize a submission at acceptance time.
    ///
    /// Unnamed submissions get a Unix-timestamp name derived from `now`, and a
    /// missing or generic content type is replaced by a sniffed one.
    ///
    /// # Arguments
    /// - `submission`: Pipeline output.
    /// - `now`: Acceptance instant; becomes `uploaded_at`.
    ///
    /// # Returns
    /// The finalized [`Artifact`].
    pub fn accept(submission: Submission, now: DateTime<Utc>) -> Self {
        let Submission {
            name,
            content_type,
            content,
        } = submission;

        let name = if name.is_empty() || name == UNNAMED {
            naming::timestamp_name(now)
        } else {
            name
        };

        let content_type = if content_type.is_empty() || content_type == GENERIC_CONTENT_TYPE {
            detection::sniff_content_type(&content).to_string()
        } else {
            content_type
        };

        Self {
            name,
            content_type,
            content,
            uploaded_at: now,
        }
    }

    /// Suggested download filename.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter-free MIME type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Stored bytes. Cloning the returned [`Bytes`] does not copy the payload.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// When the store accepted this artifact (used for conditional GETs).
    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}
