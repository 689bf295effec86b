//! Domain models shared across the client crates.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Current time in epoch milliseconds. All expiry arithmetic runs on values
/// captured at the triggering event, so the decision functions stay pure.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Persisted authentication state.
///
/// A session is usable only while `authenticated` is set, `email` is
/// non-empty, and `auth_time_ms` is within the configured TTL of now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub authenticated: bool,
    /// Normalized: trimmed and lower-cased.
    pub email: String,
    /// Epoch millis at which the session was established.
    pub auth_time_ms: i64,
}

/// Artifact links returned by a successful upload. Matches the `/upload`
/// response shape `{pdf_url, excel_url}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub pdf_url: Option<String>,
    pub excel_url: Option<String>,
}

impl UploadResult {
    /// The contract requires at least one link on success.
    pub fn has_links(&self) -> bool {
        self.pdf_url.is_some() || self.excel_url.is_some()
    }
}

/// Append `inline=1` so the server serves the artifact for in-place viewing
/// instead of as a download.
pub fn inline_url(url: &str) -> String {
    if url.contains('?') {
        format!("{}&inline=1", url)
    } else {
        format!("{}?inline=1", url)
    }
}
