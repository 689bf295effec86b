//! Route guard for the protected upload page.
//!
//! The decision is evaluated on every navigation event, not once at mount,
//! because the session can lapse mid-visit. An optional low-frequency
//! re-check timer funnels into the same expiry path so there is exactly one
//! notion of validity.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use wageproc_core::now_ms;
use wageproc_session::{SessionBackend, SessionStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session valid, render the protected content.
    Render,
    /// Session missing or expired (and now cleared), go to the access gate.
    RedirectToAccess,
}

/// Per-navigation decision.
pub fn decide<B: SessionBackend>(store: &mut SessionStore<B>, now_ms: i64) -> RouteDecision {
    if store.check_and_maybe_expire(now_ms) {
        RouteDecision::Render
    } else {
        RouteDecision::RedirectToAccess
    }
}

/// Handle for the background re-check task. Dropping it aborts the task.
#[derive(Debug)]
pub struct GuardTicker {
    handle: JoinHandle<()>,
}

impl GuardTicker {
    /// Re-evaluate the session every `interval_secs` and publish the first
    /// `RedirectToAccess` on the returned channel, then stop. The caller
    /// watches the receiver and tears the page down on redirect.
    pub fn spawn<B>(
        store: Arc<Mutex<SessionStore<B>>>,
        interval_secs: u64,
    ) -> (Self, watch::Receiver<RouteDecision>)
    where
        B: SessionBackend + Send + 'static,
    {
        let (tx, rx) = watch::channel(RouteDecision::Render);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
            interval.tick().await;
            loop {
                interval.tick().await;
                let decision = match store.lock() {
                    Ok(mut store) => decide(&mut store, now_ms()),
                    Err(_) => return,
                };
                if decision == RouteDecision::RedirectToAccess {
                    let _ = tx.send(decision);
                    return;
                }
            }
        });
        (Self { handle }, rx)
    }
}

impl Drop for GuardTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
