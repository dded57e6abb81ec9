//! Pure validators for client-declared metadata.

use crate::constants::GENERIC_CONTENT_TYPE;
use crate::error::PasteError;

/// Normalize a declared content type to its parameter-free essence.
///
/// An absent or blank value defaults to [`GENERIC_CONTENT_TYPE`].
///
/// # Returns
/// The lowercased `type/subtype` without parameters.
///
/// # Errors
/// Returns [`PasteError::InvalidContentType`] when the value is not a
/// well-formed MIME type.
pub fn normalize_content_type(declared: Option<&str>) -> Result<String, PasteError> {
    let declared = declared
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(GENERIC_CONTENT_TYPE);
    let parsed: mime::Mime = declared
        .parse()
        .map_err(|_| PasteError::InvalidContentType)?;
    Ok(parsed.essence_str().to_ascii_lowercase())
}

/// Validate a declared content length against the upload ceiling.
///
/// # Returns
/// The parsed length.
///
/// # Errors
/// - [`PasteError::MissingLength`] when nothing was declared.
/// - [`PasteError::InvalidLength`] when the value is not a non-negative integer.
/// - [`PasteError::LengthExceedsLimit`] when it is larger than `limit`.
pub fn validate_length(declared: Option<&str>, limit: u64) -> Result<u64, PasteError> {
    let raw = declared
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(PasteError::MissingLength)?;
    let length: u64 = raw.parse().map_err(|_| PasteError::InvalidLength)?;
    if length > limit {
        return Err(PasteError::LengthExceedsLimit { limit });
    }
    Ok(length)
}
