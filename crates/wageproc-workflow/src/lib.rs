//! Client-side workflows for the Quick Wage Processor.
//!
//! The state machines with behavioral contracts live here: the access gate
//! (email + PIN check, session establishment), the PIN-reminder flow with
//! its cooldown, the route guard, and the two-step upload workflow. The
//! view layer renders the states these produce and forwards user intents in.
//!
//! All network access goes through the [`PayrollApi`] trait, so every state
//! transition is testable against a scripted implementation.

pub mod access;
pub mod cooldown;
pub mod guard;
pub mod upload;

#[cfg(test)]
pub(crate) mod testutil;

pub use access::{AccessGate, AccessState, PinReminder, ReminderState};
pub use cooldown::{Cooldown, CooldownTicker};
pub use guard::{decide, GuardTicker, RouteDecision};
pub use upload::{SelectedFile, UploadEvent, UploadPhase, UploadState, UploadWorkflow};

pub use wageproc_api_client::PayrollApi;
