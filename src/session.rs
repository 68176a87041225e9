// Request controller: owns the session state for one prompt/response
// cycle and drives it through Idle -> Loading -> Success | Error.
// The presentation layer only calls `set_prompt`/`submit` and reads the
// accessors; it never mutates state directly.

use crate::api::{GenerativeModel, RawResponse};
use crate::error::SubmitError;
use crate::formatter::DisplaySegment;
use secrecy::{ExposeSecret, SecretString};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Set for the duration of `submit`. Since `submit` takes `&mut self`
    /// and blocks, callers outside the controller never observe it.
    Loading,
    Success,
    Error,
}

/// Mutable state of the session. Never persisted.
#[derive(Debug, Default)]
pub struct SessionState {
    credential: Option<SecretString>,
    prompt: String,
    is_loading: bool,
    error: Option<String>,
    results: Vec<RawResponse>,
}

pub struct RequestController<M> {
    model: M,
    model_id: String,
    state: SessionState,
}

impl<M: GenerativeModel> RequestController<M> {
    /// The credential is injected once here and never changes afterwards.
    pub fn new(model: M, model_id: impl Into<String>, credential: Option<SecretString>) -> Self {
        RequestController {
            model,
            model_id: model_id.into(),
            state: SessionState {
                credential,
                ..SessionState::default()
            },
        }
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.state.prompt = text.into();
    }

    /// Send the current prompt to the model. Every failure is recorded in
    /// the session's `error` field and also returned; the cause itself is
    /// only logged.
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        let Some(credential) = self.usable_credential() else {
            tracing::warn!("submit refused: no API key configured");
            let err = SubmitError::MissingCredential;
            self.state.error = Some(err.user_message().to_string());
            return Err(err);
        };

        self.state.is_loading = true;
        self.state.error = None;
        tracing::info!(model = %self.model_id, prompt_len = self.state.prompt.len(), "submitting prompt");

        let outcome = self
            .model
            .generate_content(&credential, &self.model_id, &self.state.prompt);
        self.state.is_loading = false;

        match outcome {
            Ok(response) => {
                tracing::info!(candidates = response.candidates.len(), "response received");
                self.state.results = vec![response];
                self.state.error = None;
                Ok(())
            }
            Err(cause) => {
                tracing::error!(error = %cause, "error fetching response");
                let err = SubmitError::from(cause);
                self.state.error = Some(err.user_message().to_string());
                Err(err)
            }
        }
    }

    fn usable_credential(&self) -> Option<SecretString> {
        self.state
            .credential
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .cloned()
    }

    pub fn has_credential(&self) -> bool {
        self.usable_credential().is_some()
    }

    pub fn prompt(&self) -> &str {
        &self.state.prompt
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn results(&self) -> &[RawResponse] {
        &self.state.results
    }

    pub fn latest(&self) -> Option<&RawResponse> {
        self.state.results.last()
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_loading {
            Phase::Loading
        } else if self.state.error.is_some() {
            Phase::Error
        } else if !self.state.results.is_empty() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// Formatted segments for each candidate of the latest response.
    pub fn segments(&self) -> Vec<Vec<DisplaySegment>> {
        self.latest()
            .map(|response| response.candidates.iter().map(|c| c.segments()).collect())
            .unwrap_or_default()
    }
}
