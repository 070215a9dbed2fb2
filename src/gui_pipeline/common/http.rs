//! Blocking HTTP helpers shared by the remote icon and catalog sources.

use std::io::Read;

use tracing::debug;

/// Upper bound on a fetched body; GUI textures and item listings are far smaller.
const MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

/// Returns true when `source` should be fetched over HTTP rather than read from disk.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetches `url` and returns the response body.
///
/// Errors are rendered to strings so callers can wrap them in the
/// variant that fits their context (image load vs. catalog).
pub fn fetch_bytes(url: &str) -> std::result::Result<Vec<u8>, String> {
    debug!("GET {}", url);

    let response = ureq::get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => format!("{}: HTTP {}", url, code),
        other => format!("{}: {}", url, other),
    })?;

    let mut body = Vec::new();
    response
        .into_reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut body)
        .map_err(|e| format!("{}: {}", url, e))?;

    debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
