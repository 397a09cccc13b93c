//! Configuration loading and resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use prospector::credentials::{API_KEY_ENV, CSE_ID_ENV};
use prospector::{Credentials, EXPORT_FILENAME};

/// Environment variable overriding the listen address.
pub const ADDR_ENV: &str = "PROSPECTOR_ADDR";

/// Listen address when neither flag nor environment set one.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Default timeout of the single outbound search request.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Resolve search credentials: CLI flag > environment variable.
pub fn resolve_credentials(api_key: Option<String>, cse_id: Option<String>) -> Credentials {
    let creds = Credentials::new(api_key, cse_id).or_env();
    if creds.is_complete() {
        tracing::debug!("Search credentials resolved");
    } else {
        tracing::debug!("Missing {API_KEY_ENV} or {CSE_ID_ENV}; real search disabled");
    }
    creds
}

/// Resolve the HTTP listen address.
pub fn resolve_addr(explicit: Option<&str>) -> String {
    if let Some(addr) = explicit {
        return addr.to_string();
    }

    std::env::var(ADDR_ENV)
        .ok()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ADDR.to_string())
}

/// Outbound request timeout.
pub fn resolve_timeout(timeout_ms: Option<u64>) -> Duration {
    Duration::from_millis(timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
}

/// Where a CSV export goes: a directory gets the default file name.
pub fn resolve_csv_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(EXPORT_FILENAME)
    } else {
        path.to_path_buf()
    }
}
