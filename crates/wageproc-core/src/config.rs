//! Configuration module
//!
//! Environment-driven client configuration: server base URL, session TTL,
//! session persistence path, and the HTTP timeout. The session TTL is a
//! configuration value, never a literal at a call site.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

// Common constants
const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;
const DEFAULT_SESSION_FILE: &str = ".wageproc-session.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Interval for the route guard's low-frequency session re-check.
pub const GUARD_RECHECK_INTERVAL_SECS: u64 = 10;

/// Client-side cooldown applied after a successful PIN reminder.
pub const REMINDER_COOLDOWN_SECS: u32 = 60;

/// Client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub session_ttl_secs: u64,
    pub session_file: PathBuf,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("WAGEPROC_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let session_file = env::var("WAGEPROC_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        Ok(Self {
            api_url,
            session_ttl_secs: env_u64("WAGEPROC_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            session_file,
            http_timeout_secs: env_u64("WAGEPROC_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
        })
    }

    /// Session TTL in epoch-millisecond units, as the expiry check consumes it.
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl_secs as i64 * 1000
    }
}

/// Read an integer env var, erroring when an explicitly set value is garbage
/// rather than silently falling back.
fn env_u64(key: &str, default: u64) -> Result<u64> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be an integer, got {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}
