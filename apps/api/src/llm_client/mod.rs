/// LLM Client — the single point of entry for all Gemini API calls in Recruiter.
///
/// ARCHITECTURAL RULE: No other module may call the generative-language API directly.
/// All model interactions MUST go through this module.
///
/// The client itself never retries. Tier selection and the quota fallback live in
/// `analysis::invoker`, which only sees the `GenerativeModel` trait.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// HTTP status the provider uses for an exhausted quota.
const QUOTA_EXCEEDED_STATUS: u16 = 429;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// True when the failure means the caller's usage allowance is used up.
    ///
    /// A 429 status is the typed signal. Errors that only carry the provider's
    /// text (transport wrappers, proxies) are matched on a `429` marker instead.
    pub fn is_quota_exceeded(&self) -> bool {
        match self {
            LlmError::Api { status, .. } if *status == QUOTA_EXCEEDED_STATUS => true,
            other => other.to_string().contains("429"),
        }
    }
}

/// A remote text-generation backend addressed by model identifier.
///
/// Carried by `ModelInvoker` as `Arc<dyn GenerativeModel>` so tests can swap in
/// a scripted backend.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate that has any.
    pub fn text(&self) -> Option<String> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .find(|text| !text.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single Gemini client used by the analysis service.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Makes a single raw call to `generateContent`, returning the full response object.
    pub async fn call(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        let body: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Gemini call succeeded: model={}, prompt_tokens={:?}, output_tokens={:?}",
                model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(body)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(model, prompt).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }
}

/// Builds an `LlmError::Api`, preferring the provider's structured message over the raw body.
fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}
