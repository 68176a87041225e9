// Error taxonomy. `ApiError` describes what went wrong talking to the
// generative API; `SubmitError` is what the request controller reports for
// a single submission. Only `SubmitError::user_message` is ever shown to
// the user: the underlying cause goes to the log.

use thiserror::Error;

pub const MISSING_CREDENTIAL_MESSAGE: &str = "Please provide a valid Gemini API key";
pub const UPSTREAM_MESSAGE: &str =
    "An Error occurred while fetching the response, Please Try Again later";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Structural(String),
}

impl ApiError {
    pub fn is_structural(&self) -> bool {
        matches!(self, ApiError::Structural(_))
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no API key configured")]
    MissingCredential,
    #[error("upstream call failed")]
    Upstream(#[source] ApiError),
    #[error("response failed validation")]
    Structural(#[source] ApiError),
}

impl SubmitError {
    /// The fixed, user-facing text for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
            SubmitError::Upstream(_) | SubmitError::Structural(_) => UPSTREAM_MESSAGE,
        }
    }
}

impl From<ApiError> for SubmitError {
    fn from(err: ApiError) -> Self {
        if err.is_structural() {
            SubmitError::Structural(err)
        } else {
            SubmitError::Upstream(err)
        }
    }
}
