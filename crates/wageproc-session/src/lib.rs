//! Persistent session state for the wageproc client.
//!
//! The access gate writes a session here after a successful PIN check; the
//! route guard and upload workflow read it on every check. Expiry is lazy:
//! there is no background sweeper, a read that observes a stale or partial
//! record clears the store and reports the session invalid.

pub mod backend;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, SessionBackend};
pub use store::{evaluate, SessionCheck, SessionStore};
