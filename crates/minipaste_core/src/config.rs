//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_INDEX_PATH, DEFAULT_PORT, DEFAULT_RETENTION, DEFAULT_UPLOAD_LIMIT,
};
use std::env;
use std::net::{Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the MiniPaste server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: SocketAddr,
    pub index_path: PathBuf,
    /// Zero disables automatic expiry.
    pub retention: Duration,
    /// Per-upload byte ceiling.
    pub upload_limit: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv6Addr::LOCALHOST, DEFAULT_PORT)),
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            retention: DEFAULT_RETENTION,
            upload_limit: DEFAULT_UPLOAD_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables are `MINIPASTE_BIND`, `MINIPASTE_INDEX`,
    /// `MINIPASTE_RETENTION` and `MINIPASTE_SIZE_LIMIT` (MiB). Missing values
    /// use defaults; unparseable values log a warning and use defaults too.
    ///
    /// # Returns
    /// A populated [`Config`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind: env_value("MINIPASTE_BIND", |raw| {
                raw.parse::<SocketAddr>().map_err(|err| err.to_string())
            })
            .unwrap_or(defaults.bind),
            index_path: env_value("MINIPASTE_INDEX", |raw| Ok(PathBuf::from(raw)))
                .unwrap_or(defaults.index_path),
            retention: env_value("MINIPASTE_RETENTION", parse_duration)
                .unwrap_or(defaults.retention),
            upload_limit: env_value("MINIPASTE_SIZE_LIMIT", parse_size_limit_mb)
                .unwrap_or(defaults.upload_limit),
        }
    }
}

fn env_value<T>(name: &str, parse: impl FnOnce(&str) -> Result<T, String>) -> Option<T> {
    let raw = env::var(name).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match parse(trimmed) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("Invalid {}='{}': {}. Falling back to default", name, raw, err);
            None
        }
    }
}

/// Convert a size limit given in MiB to bytes.
///
/// # Errors
/// Returns a message when the value is not a non-negative integer or the
/// byte count would overflow.
pub fn parse_size_limit_mb(value: &str) -> Result<u64, String> {
    let megabytes: u64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid size limit '{}'", value))?;
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| format!("size limit '{}' is too large", value))
}

/// Parse a Go-style duration string such as `90s`, `5m` or `1h30m`.
///
/// Supported units are `ns`, `us`/`µs`, `ms`, `s`, `m` and `h`; each number
/// may carry a decimal fraction. A bare `0` is accepted as zero.
///
/// # Errors
/// Returns a message for empty input, negative values, missing or unknown
/// units, and malformed numbers.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let input = value.trim();
    if input.is_empty() {
        return Err("empty duration".to_string());
    }
    if input == "0" {
        return Ok(Duration::ZERO);
    }

    let mut rest = input;
    let mut total_nanos = 0f64;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(format!("invalid duration '{}'", input));
        }
        let (number, tail) = rest.split_at(number_len);
        let amount: f64 = number
            .parse()
            .map_err(|_| format!("invalid duration '{}'", input))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let nanos_per_unit = match unit {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3_600e9,
            "" => return Err(format!("missing unit in duration '{}'", input)),
            other => {
                return Err(format!(
                    "unknown unit '{}' in duration '{}'",
                    other, input
                ))
            }
        };
        total_nanos += amount * nanos_per_unit;
        rest = tail;
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return Err(format!("duration '{}' is out of range", input));
    }
    Ok(Duration::from_nanos(total_nanos.round() as u64))
}
