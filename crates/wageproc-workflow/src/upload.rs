//! Upload workflow: validate locally, register metadata, send the file.
//!
//! Two sequential network calls back the submission: `/input` registers the
//! claim number and date of loss, and only after it reports success does the
//! multipart `/upload` run. Any failure aborts the attempt; there are no
//! automatic retries. The selected file is cleared after every network
//! attempt, success or failure, so a repeat attempt starts clean.

use wageproc_core::validation::validate_submission;
use wageproc_core::{ClientError, UploadResult};
use wageproc_session::{SessionBackend, SessionStore};

use crate::PayrollApi;

const IN_PROGRESS: &str = "A submission is already in progress.";

/// Which of the two sequential calls is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadPhase {
    Metadata,
    File,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Submitting(UploadPhase),
    Success(UploadResult),
    Error(String),
}

/// What a completed `submit` means for the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadEvent {
    /// Session lapsed at the privileged boundary; navigate to the gate.
    RedirectToAccess,
    Success(UploadResult),
    Failed(ClientError),
}

/// The payroll export chosen by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

pub struct UploadWorkflow<A> {
    api: A,
    state: UploadState,
    file: Option<SelectedFile>,
    claim_number: Option<String>,
    date_of_loss: Option<String>,
}

impl<A: PayrollApi> UploadWorkflow<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: UploadState::Idle,
            file: None,
            claim_number: None,
            date_of_loss: None,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Choosing a file discards any previous result or error.
    pub fn select_file(&mut self, name: &str, bytes: Vec<u8>) {
        self.file = Some(SelectedFile {
            name: name.to_string(),
            bytes,
        });
        self.state = UploadState::Idle;
    }

    /// The "clear selected file" affordance.
    pub fn clear_file(&mut self) {
        self.file = None;
    }

    pub fn set_metadata(&mut self, claim_number: Option<String>, date_of_loss: Option<String>) {
        self.claim_number = claim_number;
        self.date_of_loss = date_of_loss;
    }

    /// Run the full submission: session re-check, ordered validation, then
    /// the two serialized network calls. Validation failures report without
    /// any request having been issued and keep the selected file; a network
    /// attempt always consumes it.
    pub async fn submit<B: SessionBackend>(
        &mut self,
        store: &mut SessionStore<B>,
        now_ms: i64,
    ) -> UploadEvent {
        if matches!(self.state, UploadState::Submitting(_)) {
            return UploadEvent::Failed(ClientError::Validation(IN_PROGRESS.into()));
        }

        // This page performs privileged actions, so the session is enforced
        // again here even though the route guard already ran.
        if !store.check_and_maybe_expire(now_ms) {
            return UploadEvent::RedirectToAccess;
        }

        if let Err(err) = validate_submission(
            self.file.as_ref().map(|f| f.name.as_str()),
            self.claim_number.as_deref(),
            self.date_of_loss.as_deref(),
        ) {
            self.state = UploadState::Error(err.user_message());
            return UploadEvent::Failed(err);
        }

        let claim_number = self
            .claim_number
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_uppercase();
        let date_of_loss = self.date_of_loss.as_deref().unwrap_or("").trim().to_string();

        self.state = UploadState::Submitting(UploadPhase::Metadata);
        tracing::info!("registering claim metadata");
        if let Err(err) = self.api.register_input(&claim_number, &date_of_loss).await {
            self.file = None;
            self.state = UploadState::Error(err.user_message());
            return UploadEvent::Failed(err);
        }

        // The validator guarantees a file is present past this point.
        let Some(file) = self.file.take() else {
            let err = ClientError::Validation("Please select a file before submitting.".into());
            self.state = UploadState::Error(err.user_message());
            return UploadEvent::Failed(err);
        };

        self.state = UploadState::Submitting(UploadPhase::File);
        tracing::info!(file = %file.name, "uploading payroll export");
        match self.api.upload_file(&file.name, file.bytes).await {
            Ok(result) => {
                self.state = UploadState::Success(result.clone());
                UploadEvent::Success(result)
            }
            Err(err) => {
                tracing::warn!(%err, "upload failed");
                self.state = UploadState::Error(err.user_message());
                UploadEvent::Failed(err)
            }
        }
    }

    /// From Success or Error back to Idle, ready for a new file.
    pub fn reset(&mut self) {
        self.state = UploadState::Idle;
        self.file = None;
    }
}
