//! HTTP request handlers.

/// Index page and health probe.
pub mod index;
/// Download and deletion of the current paste.
pub mod paste;
pub(crate) mod request;
/// Raw-body and form upload endpoints.
pub mod upload;
