//! Wageproc Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration, and
//! input validation shared across all wageproc components. It performs no I/O.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, GUARD_RECHECK_INTERVAL_SECS, REMINDER_COOLDOWN_SECS};
pub use error::ClientError;
pub use models::{inline_url, now_ms, SessionRecord, UploadResult};
