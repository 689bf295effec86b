//! Key/value persistence behind the session store.
//!
//! The backend only moves records in and out of storage; validity decisions
//! live in [`crate::store`]. Persistence is best-effort: a session is a
//! cache of server-side auth state, so I/O failures degrade to "not signed
//! in" rather than propagating.

use std::fs;
use std::io;
use std::path::PathBuf;

use wageproc_core::SessionRecord;

pub trait SessionBackend {
    fn load(&self) -> Option<SessionRecord>;
    fn store(&mut self, record: &SessionRecord);
    fn clear(&mut self);
}

/// JSON file on disk. Survives restarts, scoped to the configured path,
/// single-reader/single-writer per client instance.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionBackend for FileBackend {
    fn load(&self) -> Option<SessionRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to read session file");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                // A corrupt record is indistinguishable from a missing one.
                tracing::warn!(path = %self.path.display(), %err, "discarding unreadable session file");
                None
            }
        }
    }

    fn store(&mut self, record: &SessionRecord) {
        let json = match serde_json::to_string_pretty(record) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(%err, "failed to serialize session record");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), %err, "failed to write session file");
        }
    }

    fn clear(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), %err, "failed to remove session file");
            }
        }
    }
}

/// In-memory backend for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    record: Option<SessionRecord>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct view of the stored record, for assertions.
    pub fn record(&self) -> Option<&SessionRecord> {
        self.record.as_ref()
    }
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Option<SessionRecord> {
        self.record.clone()
    }

    fn store(&mut self, record: &SessionRecord) {
        self.record = Some(record.clone());
    }

    fn clear(&mut self) {
        self.record = None;
    }
}
