//! Reminder-send cooldown.
//!
//! A purely local countdown that throttles repeated PIN-reminder requests.
//! It is independent of the session TTL and of any server-pushed expiry:
//! the server's only contribution is the initial duration (fixed 60 s after
//! a success, or the retry-after parsed from a 429).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Countdown state, decremented once per second while above zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cooldown {
    remaining_secs: u32,
}

impl Cooldown {
    pub fn new(secs: u32) -> Self {
        Self {
            remaining_secs: secs,
        }
    }

    pub fn active(&self) -> bool {
        self.remaining_secs > 0
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn tick(&mut self) {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.remaining_secs = 0;
    }
}

/// Handle for a running cooldown tick task. Dropping it aborts the task, so
/// a torn-down view cannot leave a timer mutating state behind it.
#[derive(Debug)]
pub struct CooldownTicker {
    handle: JoinHandle<()>,
}

impl CooldownTicker {
    /// Tick the shared cooldown once per second until it reaches zero.
    pub fn spawn(cooldown: Arc<Mutex<Cooldown>>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick of a tokio interval fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut guard = match cooldown.lock() {
                    Ok(guard) => guard,
                    Err(_) => return,
                };
                if !guard.active() {
                    return;
                }
                guard.tick();
            }
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CooldownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
