//! Memory-bounded body reading.

use crate::error::{BoxError, PasteError};
use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use std::pin::pin;

/// Collect a chunked byte stream into memory, refusing to grow past `limit`.
///
/// `size_hint` (normally the declared length) only sizes the initial
/// allocation and is capped at `limit`; it is never trusted as the bound.
///
/// # Returns
/// The complete body.
///
/// # Errors
/// - [`PasteError::UploadTooLarge`] as soon as the accumulated length would
///   exceed `limit`; the offending chunk is not copied.
/// - [`PasteError::Io`] when the stream yields an error.
pub async fn read_bounded<S, E>(stream: S, limit: u64, size_hint: u64) -> Result<Bytes, PasteError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let mut stream = pin!(stream);
    let capacity = usize::try_from(size_hint.min(limit)).unwrap_or(0);
    let mut buffer = BytesMut::with_capacity(capacity);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| PasteError::Io(err.into()))?;
        let total = (buffer.len() as u64).saturating_add(chunk.len() as u64);
        if total > limit {
            return Err(PasteError::UploadTooLarge { limit });
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer.freeze())
}
