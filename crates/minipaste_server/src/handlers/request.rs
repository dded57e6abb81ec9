//! Shared helpers for reading request metadata.

use axum::{
    extract::ConnectInfo,
    http::{header, HeaderMap, HeaderName},
};
use std::net::SocketAddr;

/// Read a header as text, replacing invalid UTF-8 instead of rejecting it.
///
/// Absent headers stay `None`; validation of the value is left to the caller.
pub(super) fn header_text(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

/// Log the client behind a request at debug level.
pub(super) fn log_client(
    action: &'static str,
    headers: &HeaderMap,
    peer: Option<&ConnectInfo<SocketAddr>>,
) {
    let user_agent = header_text(headers, header::USER_AGENT);
    let peer = peer.map(|ConnectInfo(addr)| addr.to_string());
    tracing::debug!(
        action,
        user_agent = user_agent.as_deref().unwrap_or("-"),
        peer = peer.as_deref().unwrap_or("-"),
        "request"
    );
}
