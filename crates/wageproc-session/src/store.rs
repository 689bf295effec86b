//! Session validity and lazy expiry.
//!
//! `evaluate` is the single pure decision function every reader funnels
//! through; `SessionStore::check_and_maybe_expire` applies its side effect
//! (clearing stale state). Callers pass `now_ms` explicitly so the decision
//! is testable without a clock.

use wageproc_core::validation::normalize_email;
use wageproc_core::SessionRecord;

use crate::backend::SessionBackend;

/// Outcome of a validity check, before the side effect is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCheck {
    Valid,
    /// Present but older than the TTL.
    Expired,
    /// Absent, or missing a required field.
    Missing,
}

/// Pure validity decision: valid iff the record exists with all fields set
/// and `now - auth_time_ms <= ttl`.
pub fn evaluate(record: Option<&SessionRecord>, now_ms: i64, ttl_ms: i64) -> SessionCheck {
    let Some(record) = record else {
        return SessionCheck::Missing;
    };
    if !record.authenticated || record.email.is_empty() {
        return SessionCheck::Missing;
    }
    if now_ms - record.auth_time_ms > ttl_ms {
        return SessionCheck::Expired;
    }
    SessionCheck::Valid
}

pub struct SessionStore<B> {
    backend: B,
    ttl_ms: i64,
}

impl<B: SessionBackend> SessionStore<B> {
    pub fn new(backend: B, ttl_ms: i64) -> Self {
        Self { backend, ttl_ms }
    }

    /// Establish a session for the given holder at `now_ms`.
    pub fn set(&mut self, email: &str, now_ms: i64) {
        let record = SessionRecord {
            authenticated: true,
            email: normalize_email(email),
            auth_time_ms: now_ms,
        };
        self.backend.store(&record);
    }

    /// The self-healing read: reports validity and clears the backend the
    /// moment expiry or a partial record is observed.
    pub fn check_and_maybe_expire(&mut self, now_ms: i64) -> bool {
        let record = self.backend.load();
        match evaluate(record.as_ref(), now_ms, self.ttl_ms) {
            SessionCheck::Valid => true,
            SessionCheck::Expired | SessionCheck::Missing => {
                self.backend.clear();
                false
            }
        }
    }

    /// Holder email of a currently valid session.
    pub fn email(&mut self, now_ms: i64) -> Option<String> {
        if self.check_and_maybe_expire(now_ms) {
            self.backend.load().map(|record| record.email)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.backend.clear();
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
