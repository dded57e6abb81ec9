//! Content-type sniffing from the leading bytes of an upload.
//!
//! Follows the shape of the WHATWG MIME sniffing algorithm: a fixed, ordered
//! table of signatures, then a text/binary split. Results never carry
//! parameters, so a sniffed type can be stored as-is.

mod signatures;

use crate::constants::{GENERIC_CONTENT_TYPE, SNIFF_LEN};

/// MIME type reported for content without binary control bytes.
pub const TEXT_PLAIN: &str = "text/plain";

/// Derive a MIME type from `content`.
///
/// Only the first [`SNIFF_LEN`] bytes are inspected.
///
/// # Returns
/// A parameter-free MIME type; [`GENERIC_CONTENT_TYPE`] when nothing matches
/// and the data looks binary.
pub fn sniff_content_type(content: &[u8]) -> &'static str {
    let head = &content[..content.len().min(SNIFF_LEN)];
    let body = skip_whitespace(head);

    if let Some(mime) = signatures::SIGNATURES
        .iter()
        .find_map(|signature| signature.match_bytes(head, body))
    {
        return mime;
    }

    if looks_like_text(body) {
        TEXT_PLAIN
    } else {
        GENERIC_CONTENT_TYPE
    }
}

fn skip_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|byte| !is_sniff_whitespace(*byte))
        .unwrap_or(data.len());
    &data[start..]
}

fn is_sniff_whitespace(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | 0x0c | b'\r' | b' ')
}

fn looks_like_text(data: &[u8]) -> bool {
    !data.iter().any(|byte| {
        matches!(byte, 0x00..=0x08 | 0x0b | 0x0e..=0x1a | 0x1c..=0x1f)
    })
}
