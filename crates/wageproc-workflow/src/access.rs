//! Access gate: email + PIN check, session establishment, PIN reminders.

use std::sync::{Arc, Mutex};

use wageproc_core::validation::{is_valid_email, normalize_email};
use wageproc_core::{ClientError, REMINDER_COOLDOWN_SECS};
use wageproc_session::{SessionBackend, SessionStore};

use crate::cooldown::{Cooldown, CooldownTicker};
use crate::PayrollApi;

const IN_PROGRESS: &str = "A submission is already in progress.";
const INVALID_EMAIL: &str = "Please enter a valid email address.";

/// Gate state as rendered by the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessState {
    Idle,
    Submitting,
    Authenticated,
    /// Server answered, credentials do not match.
    Rejected(String),
    /// Server unreachable or answered outside the contract.
    ServerError(String),
}

pub struct AccessGate<A> {
    api: A,
    state: AccessState,
}

impl<A: PayrollApi> AccessGate<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: AccessState::Idle,
        }
    }

    pub fn state(&self) -> &AccessState {
        &self.state
    }

    /// On navigation to the gate: an already valid session skips the form
    /// entirely and the caller proceeds straight to the upload page.
    pub fn try_short_circuit<B: SessionBackend>(
        &mut self,
        store: &mut SessionStore<B>,
        now_ms: i64,
    ) -> bool {
        if store.check_and_maybe_expire(now_ms) {
            self.state = AccessState::Authenticated;
            true
        } else {
            false
        }
    }

    /// Validate and submit the credential check. Email-shape failures are
    /// local: the gate never enters `Submitting` and no request is issued.
    pub async fn submit<B: SessionBackend>(
        &mut self,
        store: &mut SessionStore<B>,
        email: &str,
        pin: &str,
        now_ms: i64,
    ) -> Result<(), ClientError> {
        if self.state == AccessState::Submitting {
            return Err(ClientError::Validation(IN_PROGRESS.into()));
        }

        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ClientError::Validation(INVALID_EMAIL.into()));
        }

        self.state = AccessState::Submitting;
        tracing::info!(%email, "submitting credential check");

        match self.api.check_pin(&email, pin).await {
            Ok(true) => {
                store.set(&email, now_ms);
                self.state = AccessState::Authenticated;
                tracing::info!(%email, "authenticated");
                Ok(())
            }
            Ok(false) => {
                let err = ClientError::AuthRejected;
                self.state = AccessState::Rejected(err.user_message());
                Err(err)
            }
            Err(err) => {
                tracing::warn!(%err, "credential check failed");
                self.state = AccessState::ServerError(err.user_message());
                Err(err)
            }
        }
    }

    /// Recover from a terminal state (or an abandoned in-flight submit) so
    /// the user can try again.
    pub fn reset(&mut self) {
        self.state = AccessState::Idle;
    }
}

/// Reminder-dialog state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReminderState {
    Idle,
    Sending,
    /// Confirmation shown; the wording deliberately does not reveal whether
    /// the email was registered.
    Sent,
    Failed(String),
}

/// The "send PIN reminder" flow with its local cooldown.
pub struct PinReminder<A> {
    api: A,
    state: ReminderState,
    cooldown: Arc<Mutex<Cooldown>>,
}

impl<A: PayrollApi> PinReminder<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ReminderState::Idle,
            cooldown: Arc::new(Mutex::new(Cooldown::default())),
        }
    }

    pub fn state(&self) -> &ReminderState {
        &self.state
    }

    pub fn cooldown_secs(&self) -> u32 {
        self.cooldown.lock().map(|c| c.remaining_secs()).unwrap_or(0)
    }

    pub fn can_send(&self) -> bool {
        self.state != ReminderState::Sending && self.cooldown_secs() == 0
    }

    /// Reopening the dialog resets state and cooldown.
    pub fn reopen(&mut self) {
        self.state = ReminderState::Idle;
        if let Ok(mut cooldown) = self.cooldown.lock() {
            cooldown.reset();
        }
    }

    /// Start ticking the cooldown once per second. The returned guard must
    /// be held by the owning view; dropping it cancels the timer.
    pub fn start_ticker(&self) -> CooldownTicker {
        CooldownTicker::spawn(self.cooldown.clone())
    }

    /// Request a PIN reminder for `email`. Refuses locally on a bad address
    /// or an active cooldown, without touching the network.
    pub async fn send(&mut self, email: &str) -> Result<(), ClientError> {
        if self.state == ReminderState::Sending {
            return Err(ClientError::Validation(IN_PROGRESS.into()));
        }

        let email = normalize_email(email);
        if !is_valid_email(&email) {
            let err = ClientError::Validation(INVALID_EMAIL.into());
            self.state = ReminderState::Failed(err.user_message());
            return Err(err);
        }

        let remaining = self.cooldown_secs();
        if remaining > 0 {
            return Err(ClientError::RateLimited {
                retry_after_secs: remaining,
            });
        }

        self.state = ReminderState::Sending;
        tracing::info!(%email, "requesting PIN reminder");

        match self.api.forgot_pin(&email).await {
            Ok(()) => {
                self.state = ReminderState::Sent;
                self.set_cooldown(REMINDER_COOLDOWN_SECS);
                Ok(())
            }
            Err(err) => {
                if let ClientError::RateLimited { retry_after_secs } = err {
                    self.set_cooldown(retry_after_secs);
                }
                self.state = ReminderState::Failed(err.user_message());
                Err(err)
            }
        }
    }

    fn set_cooldown(&self, secs: u32) {
        if let Ok(mut cooldown) = self.cooldown.lock() {
            *cooldown = Cooldown::new(secs);
        }
    }
}
