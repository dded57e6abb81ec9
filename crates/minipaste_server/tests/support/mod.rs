//! Shared integration-test server bootstrap helpers.

use axum::body::Bytes;
use axum_test::{TestRequest, TestServer};
use minipaste_server::{create_app, AppState, Config, PasteStore};
use std::path::Path;
use std::time::Duration;

pub(crate) const TEST_LIMIT: u64 = 64;

pub(crate) fn test_config(index_path: &Path) -> Config {
    Config {
        bind: "127.0.0.1:0".parse().expect("bind addr"),
        index_path: index_path.to_path_buf(),
        retention: Duration::from_secs(300),
        upload_limit: TEST_LIMIT,
    }
}

pub(crate) fn test_server_for_config(config: Config) -> (TestServer, PasteStore) {
    let state = AppState::new(config);
    let store = state.store.clone();
    let server = TestServer::new(create_app(state)).expect("server");
    (server, store)
}

pub(crate) fn setup_test_server() -> (TestServer, PasteStore) {
    setup_test_server_with_limit(TEST_LIMIT)
}

/// Server with a custom upload ceiling; form envelopes need room beyond the payload.
pub(crate) fn setup_test_server_with_limit(upload_limit: u64) -> (TestServer, PasteStore) {
    let mut config = test_config(Path::new("/nonexistent/minipaste/index.html"));
    config.upload_limit = upload_limit;
    test_server_for_config(config)
}

/// Raw-body upload with explicit length and (optionally) type headers.
pub(crate) fn put_upload(
    server: &TestServer,
    name: &str,
    content_type: Option<&str>,
    content: &[u8],
) -> TestRequest {
    let request = server
        .put(&format!("/{}", name))
        .add_header("content-length", content.len().to_string())
        .bytes(Bytes::copy_from_slice(content));
    match content_type {
        Some(value) => request.add_header("content-type", value.to_string()),
        None => request,
    }
}

/// Form upload of a single part named `field`.
pub(crate) fn form_upload(
    server: &TestServer,
    field: &str,
    filename: &str,
    part_type: &str,
    content: &[u8],
) -> TestRequest {
    let boundary = "minipaste-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part_type).as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    server
        .post("/")
        .add_header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .add_header("content-length", body.len().to_string())
        .bytes(Bytes::from(body))
}
