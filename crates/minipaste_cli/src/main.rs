//! Command-line client for a MiniPaste server.

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use minipaste_core::detection::sniff_content_type;
use minipaste_core::{DEFAULT_CLI_SERVER_URL, UNNAMED};
use serde_json::Value;
use std::io::{self, Read};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "minipaste", about = "Upload to a MiniPaste server", version)]
struct Cli {
    /// Server URL (can also be set via MINIPASTE_SERVER env var)
    #[arg(short, long, env = "MINIPASTE_SERVER")]
    server: Option<String>,

    /// Delete the current paste instead of uploading
    #[arg(short, long)]
    delete: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value = "60")]
    timeout: u64,

    /// Print timing for the request
    #[arg(long)]
    timing: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,

    /// File to upload; `-` reads stdin
    #[arg(default_value = UNNAMED)]
    file: String,
}

/// Upload payload gathered from a file or stdin.
#[derive(Debug)]
struct Source {
    name: String,
    content: Vec<u8>,
    content_type: &'static str,
}

fn log_timing(timing: bool, label: &str, duration: Duration) {
    if timing {
        eprintln!(
            "[timing] {}: {:.1} ms",
            label,
            duration.as_secs_f64() * 1000.0
        );
    }
}

fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

/// Redirects count as success; the upload answer is a `303` to the paste.
fn is_accepted(status: reqwest::StatusCode) -> bool {
    status.is_success() || status.is_redirection()
}

async fn ensure_accepted_or_exit(res: reqwest::Response, action: &str) -> reqwest::Response {
    let status = res.status();
    if is_accepted(status) {
        return res;
    }

    let body = match res.text().await {
        Ok(body) => body,
        Err(err) => format!("failed to read error response body: {}", err),
    };
    let message = error_message_for_response(status, &body);
    eprintln!("{} failed ({}): {}", action, status, message);
    std::process::exit(1);
}

fn api_url(server: &str, segments: &[&str]) -> Result<reqwest::Url, String> {
    let mut url = reqwest::Url::parse(server)
        .map_err(|err| format!("Invalid server URL '{}': {}", server, err))?;
    let mut path = url
        .path_segments_mut()
        .map_err(|_| "Server URL cannot be used as an API base".to_string())?;
    path.pop_if_empty();
    for segment in segments {
        path.push(segment);
    }
    drop(path);
    Ok(url)
}

fn normalize_server(server: Option<String>) -> String {
    let server = server
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_CLI_SERVER_URL.to_string());
    server.trim_end_matches('/').to_string()
}

/// Name the server should store the upload under: the path's final component.
fn upload_name(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNNAMED.to_string())
}

/// Read the upload from `file`, or from `stdin` when `file` is `-`.
///
/// # Errors
/// Returns a message when reading fails or the input is empty.
fn read_source(file: &str, mut stdin: impl Read) -> Result<Source, String> {
    let content = if file == UNNAMED {
        let mut buffer = Vec::new();
        stdin
            .read_to_end(&mut buffer)
            .map_err(|err| format!("failed to read stdin: {}", err))?;
        buffer
    } else {
        std::fs::read(file).map_err(|err| format!("failed to read {}: {}", file, err))?
    };

    if content.is_empty() {
        return Err(format!("file {} has no content", file));
    }

    Ok(Source {
        name: upload_name(file),
        content_type: sniff_content_type(&content),
        content,
    })
}

fn exit_with(action: &str, message: &str) -> ! {
    eprintln!("{} failed: {}", action, message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        server,
        delete,
        timeout,
        timing,
        completions,
        file,
    } = Cli::parse();

    if let Some(shell) = completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let server = normalize_server(server);

    let (action, request) = if delete {
        let endpoint = api_url(&server, &["paste"]).unwrap_or_else(|err| exit_with("Delete", &err));
        ("Delete", client.delete(endpoint))
    } else {
        let source = read_source(&file, io::stdin().lock())
            .unwrap_or_else(|err| exit_with("Upload", &err));
        let endpoint = api_url(&server, &[source.name.as_str()])
            .unwrap_or_else(|err| exit_with("Upload", &err));
        let request = client
            .put(endpoint)
            .header(reqwest::header::CONTENT_TYPE, source.content_type)
            .body(source.content);
        ("Upload", request)
    };

    let request_start = Instant::now();
    let res = request.send().await?;
    log_timing(timing, &action.to_ascii_lowercase(), request_start.elapsed());
    let res = ensure_accepted_or_exit(res, action).await;

    print!("{}", res.text().await?);
    Ok(())
}
