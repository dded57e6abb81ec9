//! Integration tests for the MiniPaste HTTP API.

mod support;

use axum::http::{Method, StatusCode};
use minipaste_server::ClearCause;
use serde_json::{json, Value};
use std::time::Duration;
use support::{
    form_upload, put_upload, setup_test_server, setup_test_server_with_limit, test_config,
    test_server_for_config,
};
use tempfile::TempDir;

const GIF_HEADER: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00";
const FORM_LIMIT: u64 = 4096;

#[tokio::test]
async fn test_put_then_get_round_trip() {
    let (server, _store) = setup_test_server();

    let upload = put_upload(&server, "notes.txt", Some("text/plain; charset=utf-8"), b"hello").await;
    assert_eq!(upload.status_code(), StatusCode::SEE_OTHER);
    let location = upload.header("location");
    let location = location.to_str().expect("ascii location");
    assert!(location.starts_with("http://"));
    assert!(location.ends_with("/paste"));
    assert_eq!(upload.text(), format!("{}\n", location));

    let response = server.get("/paste").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.as_bytes().as_ref(), b"hello");
    response.assert_header("content-type", "text/plain");
    response.assert_header("content-disposition", "filename=\"notes.txt\"");
    assert!(response.contains_header("last-modified"));
}

#[tokio::test]
async fn test_head_paste_sends_headers_only() {
    let (server, _store) = setup_test_server();
    put_upload(&server, "a.txt", Some("text/plain"), b"abc").await;

    let response = server.method(Method::HEAD, "/paste").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.assert_header("content-type", "text/plain");
    assert!(response.as_bytes().is_empty());
}

#[tokio::test]
async fn test_paste_responses_carry_security_headers() {
    let (server, _store) = setup_test_server();
    put_upload(&server, "page.html", Some("text/html"), b"<script>1</script>").await;

    for response in [server.get("/paste").await, server.delete("/paste").await] {
        response.assert_header("content-security-policy", "default-src 'none'");
        response.assert_header("referrer-policy", "no-referrer");
        response.assert_header("x-frame-options", "DENY");
        response.assert_header("x-content-type-options", "nosniff");
        assert!(response.contains_header("x-xss-protection"));
    }
}

#[tokio::test]
async fn test_empty_store_answers_gone() {
    let (server, _store) = setup_test_server();

    let response = server.get("/paste").await;
    assert_eq!(response.status_code(), StatusCode::GONE);
    let body: Value = response.json();
    assert!(body["error"].as_str().expect("error message").contains("expired"));
}

#[tokio::test]
async fn test_delete_reports_whether_a_paste_was_removed() {
    let (server, _store) = setup_test_server();
    put_upload(&server, "a.txt", Some("text/plain"), b"a").await;

    let first = server.delete("/paste").await;
    assert_eq!(first.status_code(), StatusCode::OK);
    assert_eq!(first.json::<Value>(), json!({ "deleted": true }));

    assert_eq!(server.get("/paste").await.status_code(), StatusCode::GONE);

    let second = server.delete("/paste").await;
    assert_eq!(second.status_code(), StatusCode::OK);
    assert_eq!(second.json::<Value>(), json!({ "deleted": false }));
}

#[tokio::test]
async fn test_newest_upload_replaces_previous() {
    let (server, store) = setup_test_server();
    put_upload(&server, "first.txt", Some("text/plain"), b"first").await;
    put_upload(&server, "second.txt", Some("text/plain"), b"second").await;

    let response = server.get("/paste").await;
    assert_eq!(response.as_bytes().as_ref(), b"second");
    assert_eq!(store.get().expect("paste").name(), "second.txt");
}

#[tokio::test]
async fn test_unnamed_untyped_upload_is_named_and_sniffed() {
    let (server, _store) = setup_test_server();

    let upload = put_upload(&server, "-", None, GIF_HEADER).await;
    assert_eq!(upload.status_code(), StatusCode::SEE_OTHER);

    let response = server.get("/paste").await;
    response.assert_header("content-type", "image/gif");
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().expect("ascii disposition");
    let name = disposition
        .strip_prefix("filename=\"")
        .and_then(|rest| rest.strip_suffix('"'))
        .expect("quoted filename");
    assert!(!name.is_empty());
    assert!(name.chars().all(|c| c.is_ascii_digit()), "name: {}", name);
}

#[tokio::test]
async fn test_rejected_uploads_keep_previous_paste() {
    let (server, store) = setup_test_server();
    put_upload(&server, "keep.txt", Some("text/plain"), b"keep me").await;

    let missing_length = server
        .put("/x.txt")
        .add_header("content-type", "text/plain")
        .await;
    assert_eq!(missing_length.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        missing_length.json::<Value>()["error"],
        "missing content length"
    );

    let garbage_length = server
        .put("/x.txt")
        .add_header("content-type", "text/plain")
        .add_header("content-length", "lots")
        .await;
    assert_eq!(garbage_length.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        garbage_length.json::<Value>()["error"],
        "garbage content length"
    );

    let garbage_type = put_upload(&server, "x.txt", Some("garbage"), b"x").await;
    assert_eq!(garbage_type.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(garbage_type.json::<Value>()["error"], "garbage content type");

    let too_large = put_upload(&server, "big.bin", Some("text/plain"), &[b'a'; 65]).await;
    assert_eq!(too_large.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

    let kept = store.get().expect("previous paste survives");
    assert_eq!(kept.name(), "keep.txt");
    assert_eq!(kept.content().as_ref(), b"keep me");
}

#[tokio::test]
async fn test_upload_exactly_at_limit_is_accepted() {
    let (server, store) = setup_test_server();

    let response = put_upload(&server, "full.bin", Some("text/plain"), &[b'a'; 64]).await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(store.get().expect("paste").len(), 64);
}

#[tokio::test]
async fn test_form_upload_uses_file_part() {
    let (server, _store) = setup_test_server_with_limit(FORM_LIMIT);

    let upload = form_upload(&server, "file", "cat.txt", "text/plain", b"meow").await;
    assert_eq!(upload.status_code(), StatusCode::SEE_OTHER);
    assert!(upload.text().ends_with("/paste\n"));

    let response = server.get("/paste").await;
    assert_eq!(response.as_bytes().as_ref(), b"meow");
    response.assert_header("content-type", "text/plain");
    response.assert_header("content-disposition", "filename=\"cat.txt\"");
}

#[tokio::test]
async fn test_form_upload_rejects_other_fields() {
    let (server, store) = setup_test_server_with_limit(FORM_LIMIT);
    put_upload(&server, "keep.txt", Some("text/plain"), b"keep me").await;

    let response = form_upload(&server, "avatar", "me.png", "image/png", b"png").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "submitted form contains unsupported fields"
    );
    assert_eq!(store.get().expect("paste").name(), "keep.txt");
}

#[tokio::test]
async fn test_form_envelope_counts_against_limit() {
    let (server, store) = setup_test_server();
    put_upload(&server, "keep.txt", Some("text/plain"), b"keep me").await;

    // A tiny payload still arrives in an envelope larger than the 64-byte ceiling.
    let response = form_upload(&server, "file", "cat.txt", "text/plain", b"meow").await;
    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(store.get().expect("paste").name(), "keep.txt");
}

#[tokio::test]
async fn test_upload_limit_is_not_capped_by_router_default() {
    let (server, store) = setup_test_server_with_limit(4 * 1024 * 1024);
    let content = vec![b'a'; 3 * 1024 * 1024];

    let response = put_upload(&server, "big.txt", Some("text/plain"), &content).await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(store.get().expect("paste").len(), content.len());
}

#[tokio::test]
async fn test_form_upload_rejects_corrupt_envelope() {
    let (server, _store) = setup_test_server();

    let response = server
        .post("/")
        .add_header("content-type", "multipart/form-data")
        .add_header("content-length", "4")
        .bytes("junk".into())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "submitted form was corrupt"
    );
}

#[tokio::test]
async fn test_conditional_get_honours_if_modified_since() {
    let (server, _store) = setup_test_server();
    put_upload(&server, "a.txt", Some("text/plain"), b"a").await;

    let first = server.get("/paste").await;
    let last_modified = first.header("last-modified");
    let last_modified = last_modified.to_str().expect("ascii date").to_string();

    let cached = server
        .get("/paste")
        .add_header("if-modified-since", last_modified)
        .await;
    assert_eq!(cached.status_code(), StatusCode::NOT_MODIFIED);
    assert!(cached.as_bytes().is_empty());

    let stale = server
        .get("/paste")
        .add_header("if-modified-since", "Sun, 06 Nov 1994 08:49:37 GMT")
        .await;
    assert_eq!(stale.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_paste_expires_after_retention() {
    let temp_dir = TempDir::new().expect("temp dir");
    let mut config = test_config(&temp_dir.path().join("index.html"));
    config.retention = Duration::from_millis(50);
    let (server, store) = test_server_for_config(config);

    put_upload(&server, "short.txt", Some("text/plain"), b"brief").await;
    assert_eq!(server.get("/paste").await.status_code(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(server.get("/paste").await.status_code(), StatusCode::GONE);
    assert!(!store.clear(ClearCause::Request));
}

#[tokio::test]
async fn test_health_is_ok() {
    let (server, _store) = setup_test_server();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.as_bytes().is_empty());
}

#[tokio::test]
async fn test_index_falls_back_to_built_in_page() {
    let (server, _store) = setup_test_server();
    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("minipaste"));
}

#[tokio::test]
async fn test_index_serves_configured_file() {
    let temp_dir = TempDir::new().expect("temp dir");
    let index_path = temp_dir.path().join("index.html");
    std::fs::write(&index_path, "<h1>welcome</h1>").expect("write index");
    let (server, _store) = test_server_for_config(test_config(&index_path));

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.assert_header("content-type", "text/html; charset=utf-8");
    assert_eq!(response.text(), "<h1>welcome</h1>");
}
