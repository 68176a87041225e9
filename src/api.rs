// API client module: a small blocking HTTP client for the Gemini
// `generateContent` endpoint, plus the wire types and the boundary check
// that turns a raw JSON answer into a validated `RawResponse`.

use crate::config::Config;
use crate::error::ApiError;
use crate::formatter::{format_response, DisplaySegment};
use anyhow::{Context, Result};
use reqwest::blocking::{Client, ClientBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can answer a prompt. The request controller only talks
/// to this trait, which keeps it testable without a network.
pub trait GenerativeModel {
    fn generate_content(
        &self,
        api_key: &SecretString,
        model: &str,
        prompt: &str,
    ) -> Result<RawResponse, ApiError>;
}

/// Blocking client for the Gemini REST API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

// Request body for `models/{model}:generateContent`.
#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Serialize, Debug)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<RequestPart>,
}

#[derive(Serialize, Debug)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user".into(),
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Response body as the API sends it. Every field is optional here; the
/// shape is checked in `RawResponse::try_from`.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<WireCandidate>>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub model_version: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct WireCandidate {
    pub content: Option<WireContent>,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct WireContent {
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

#[derive(Deserialize, Debug, Default)]
pub struct WirePart {
    pub text: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// A validated answer: one entry per candidate, each with its text body.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RawResponse {
    pub candidates: Vec<Candidate>,
    pub model_version: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub finish_reason: Option<String>,
}

impl Candidate {
    pub fn segments(&self) -> Vec<DisplaySegment> {
        format_response(&self.text)
    }
}

impl TryFrom<GenerateContentResponse> for RawResponse {
    type Error = ApiError;

    fn try_from(wire: GenerateContentResponse) -> Result<Self, ApiError> {
        let Some(wire_candidates) = wire.candidates else {
            let reason = match wire.prompt_feedback.and_then(|f| f.block_reason) {
                Some(block) => format!("no candidates (prompt blocked: {block})"),
                None => "no candidates".to_string(),
            };
            return Err(ApiError::Structural(reason));
        };

        let candidates = wire_candidates
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| {
                let text = candidate
                    .content
                    .and_then(|content| content.parts.into_iter().next())
                    .and_then(|part| part.text)
                    .ok_or_else(|| {
                        ApiError::Structural(format!(
                            "candidate {index} has no content.parts[0].text"
                        ))
                    })?;
                Ok(Candidate {
                    text,
                    finish_reason: candidate.finish_reason,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        Ok(RawResponse {
            candidates,
            model_version: wire.model_version,
        })
    }
}

impl GeminiClient {
    /// Create a client for `config.base_url` with the configured timeout.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_builder(config, Client::builder())
    }

    /// Same as `new`, but ignores any proxy settings in the environment.
    #[cfg(test)]
    fn without_proxy(config: &Config) -> Result<Self> {
        Self::with_builder(config, Client::builder().no_proxy())
    }

    fn with_builder(config: &Config, builder: ClientBuilder) -> Result<Self> {
        let client = builder
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(GeminiClient {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

impl GenerativeModel for GeminiClient {
    fn generate_content(
        &self,
        api_key: &SecretString,
        model: &str,
        prompt: &str,
    ) -> Result<RawResponse, ApiError> {
        let url = self.endpoint(model);
        tracing::debug!(%url, prompt_len = prompt.len(), "sending generateContent request");

        let res = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .map_err(ApiError::Transport)?;

        let status = res.status();
        let body = res.text().map_err(ApiError::Transport)?;
        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }

        let wire: GenerateContentResponse =
            serde_json::from_str(&body).map_err(ApiError::Decode)?;
        let response = RawResponse::try_from(wire)?;
        tracing::debug!(
            candidates = response.candidates.len(),
            model_version = response.model_version.as_deref().unwrap_or("unknown"),
            "received generateContent response"
        );
        for (index, candidate) in response.candidates.iter().enumerate() {
            let finish_reason = candidate.finish_reason.as_deref().unwrap_or("unspecified");
            if finish_reason != "STOP" {
                tracing::warn!(index, finish_reason, "candidate did not finish normally");
            }
        }
        Ok(response)
    }
}
