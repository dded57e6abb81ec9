//! Shared constants used across MiniPaste crates.

use std::time::Duration;

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default listen address for the server (IPv6 loopback).
pub const DEFAULT_BIND: &str = "[::1]:8080";

/// Default base URL for the command-line client.
pub const DEFAULT_CLI_SERVER_URL: &str = "http://[::1]:8080";

/// Default homepage file served at `/` when present.
pub const DEFAULT_INDEX_PATH: &str = "./index.html";

/// Default retention before the current paste is discarded.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(5 * 60);

/// Default per-upload ceiling in MiB.
pub const DEFAULT_UPLOAD_LIMIT_MB: u64 = 16;

/// Default per-upload ceiling in bytes.
pub const DEFAULT_UPLOAD_LIMIT: u64 = DEFAULT_UPLOAD_LIMIT_MB * 1024 * 1024;

/// Name sentinel meaning "no name given"; replaced with a timestamp at store time.
pub const UNNAMED: &str = "-";

/// MIME type assumed when a client declares none.
pub const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";

/// Multipart form field that carries the uploaded file.
pub const FORM_FILE_FIELD: &str = "file";

/// Number of leading bytes inspected by content sniffing.
pub const SNIFF_LEN: usize = 512;
