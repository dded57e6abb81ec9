use super::artifact::{Artifact, Submission, UploadMethod};
use bytes::Bytes;
use chrono::{TimeZone, Utc};

fn submission(name: &str, content_type: &str, content: &'static [u8]) -> Submission {
    Submission {
        name: name.to_string(),
        content_type: content_type.to_string(),
        content: Bytes::from_static(content),
    }
}

#[test]
fn accept_synthesizes_timestamp_name_for_unnamed_submissions() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    for name in ["-", ""] {
        let artifact = Artifact::accept(submission(name, "text/plain", b"hello"), now);
        assert_eq!(artifact.name(), now.timestamp().to_string());
    }
}

#[test]
fn accept_keeps_explicit_names_and_declared_types() {
    let now = Utc::now();
    let artifact = Artifact::accept(submission("notes.txt", "text/markdown", b"# hi"), now);
    assert_eq!(artifact.name(), "notes.txt");
    assert_eq!(artifact.content_type(), "text/markdown");
    assert_eq!(artifact.content().as_ref(), b"# hi");
    assert_eq!(artifact.len(), 4);
    assert_eq!(artifact.uploaded_at(), now);
}

#[test]
fn accept_sniffs_missing_or_generic_content_type() {
    let now = Utc::now();
    let gif = Artifact::accept(submission("-", "", b"GIF89a\x01\x00\x01\x00"), now);
    assert_eq!(gif.content_type(), "image/gif");

    let text = Artifact::accept(
        submission("a", "application/octet-stream", b"plain words\n"),
        now,
    );
    assert_eq!(text.content_type(), "text/plain");
}

#[test]
fn upload_method_tags_match_audit_names() {
    assert_eq!(UploadMethod::Put.to_string(), "put");
    assert_eq!(UploadMethod::Form.to_string(), "0x0");
}
