use tracing::warn;

/// Upper bound for error bodies quoted in error messages.
pub(crate) const MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

/// Reads an upstream error body, truncated to `max_bytes`.
pub(crate) async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}
