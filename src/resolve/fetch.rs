//! Remote resource fetching, gated by an explicit opt-in policy.
//!
//! ## Why default-deny?
//!
//! A document being rendered is untrusted input: letting it trigger
//! arbitrary outbound HTTP requests from the render host is a data-exfil
//! and SSRF vector. Fetching is therefore off unless the caller opted in
//! through [`crate::config::RenderConfig::allow_remote_fetch`], and the
//! policy check happens *before* any client is even constructed so a
//! disabled fetch provably performs no network activity.
//!
//! Fetches are blocking (the whole pipeline is synchronous — the engine is
//! waiting on this very call mid-layout) and bounded by a per-request
//! timeout so a dead host cannot stall the conversion forever.

use super::data_uri::write_temp;
use std::path::Path;
use std::time::Duration;
use tempfile::TempPath;
use tracing::{debug, info, warn};

/// Download `url` to a uniquely named temp file.
///
/// Returns `None` (caller substitutes the original URI) when:
/// - remote fetching is disallowed by policy (checked first, no network),
/// - the request fails or times out,
/// - the server answers with a non-success status,
/// - the body cannot be read or written.
pub fn fetch(
    url: &str,
    allow_remote: bool,
    timeout_secs: u64,
    temp_dir: Option<&Path>,
) -> Option<TempPath> {
    if !allow_remote {
        debug!("Remote fetch disabled by policy, skipping {url}");
        return None;
    }

    info!("Fetching remote resource: {url}");

    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to build HTTP client: {e}");
            return None;
        }
    };

    let response = match client.get(url).send() {
        Ok(r) => r,
        Err(e) => {
            warn!("Fetch failed for {url}: {e}");
            return None;
        }
    };

    if !response.status().is_success() {
        warn!("Fetch failed for {url}: HTTP {}", response.status());
        return None;
    }

    let bytes = match response.bytes() {
        Ok(b) => b,
        Err(e) => {
            warn!("Failed to read response body from {url}: {e}");
            return None;
        }
    };

    let ext = extension_for_url(url);
    match write_temp(&bytes, ext, temp_dir) {
        Ok(path) => {
            debug!("Fetched {} bytes → {}", bytes.len(), path.display());
            Some(path)
        }
        Err(e) => {
            warn!("Failed to write fetched resource: {e}");
            None
        }
    }
}

/// Derive a file extension from the URL path, defaulting to `bin`.
///
/// Only the path segment is considered — query strings and fragments are
/// ignored. The extension is passed through as-is when it looks like one
/// (short, alphanumeric); anything else falls back to `bin`.
fn extension_for_url(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);

    let last_segment = path.rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 5
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext
        }
        _ => "bin",
    }
}
