//! Gemini Client - HTTP client for the `generateContent` API
//!
//! Sends one structured-output request per call and hands back the raw text
//! payload. Parsing is left to the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::models::{LlmSettings, RoadmapError};
use super::prompt::GenerationPrompt;

const JSON_MIME_TYPE: &str = "application/json";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Produces the raw text payload for a prompt.
///
/// `Ok(None)` means the call succeeded but the model returned no text.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    fn model_name(&self) -> &str;

    async fn generate(&self, prompt: &GenerationPrompt) -> Result<Option<String>, RoadmapError>;
}

#[async_trait]
impl<G: ContentGenerator + ?Sized> ContentGenerator for std::sync::Arc<G> {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    async fn generate(&self, prompt: &GenerationPrompt) -> Result<Option<String>, RoadmapError> {
        (**self).generate(prompt).await
    }
}

/// Gemini HTTP Client
pub struct GeminiClient {
    http_client: Client,
    settings: LlmSettings,
}

impl GeminiClient {
    pub fn new(settings: LlmSettings) -> Result<Self, RoadmapError> {
        if settings.api_key.trim().is_empty() {
            return Err(RoadmapError::MissingApiKey);
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| {
                RoadmapError::GenerationFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http_client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn build_request<'a>(&self, prompt: &'a GenerationPrompt) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &prompt.instruction }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: prompt.system_instruction }],
            },
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: prompt.response_schema,
                temperature: self.settings.temperature,
            },
        }
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    fn model_name(&self) -> &str {
        &self.settings.model
    }

    async fn generate(&self, prompt: &GenerationPrompt) -> Result<Option<String>, RoadmapError> {
        let url = self.endpoint();
        let body = self.build_request(prompt);

        tracing::debug!("Calling generative model API: {} ({:?})", url, prompt.template);

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoadmapError::Timeout(self.settings.timeout_secs)
                } else if e.is_connect() {
                    RoadmapError::GenerationFailed(format!("Connection failed: {}", e))
                } else {
                    RoadmapError::GenerationFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(RoadmapError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RoadmapError::GenerationFailed(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let envelope: GenerateContentResponse = response.json().await.map_err(|e| {
            RoadmapError::GenerationFailed(format!("Unreadable API response: {}", e))
        })?;

        if let Some(reason) = envelope
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            tracing::warn!("Prompt blocked by the model: {}", reason);
        }

        if let Some(usage) = &envelope.usage_metadata {
            tracing::debug!(
                "Token usage - prompt: {}, candidates: {}",
                usage.prompt_token_count,
                usage.candidates_token_count
            );
        }

        let text = extract_text(&envelope);
        if text.is_none() {
            let finish_reason = envelope
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            tracing::warn!("Model returned no text (finish reason: {})", finish_reason);
        }

        Ok(text)
    }
}

/// Concatenated text of the first candidate, skipping thought parts
pub fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates.first()?;
    let text: String = candidate
        .content
        .as_ref()?
        .parts
        .iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.trim().is_empty() { None } else { Some(text) }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

#[cfg(test)]
impl GeminiClient {
    pub(crate) fn request_body_for_test(&self, prompt: &GenerationPrompt) -> Value {
        serde_json::to_value(self.build_request(prompt)).unwrap_or(Value::Null)
    }

    pub(crate) fn endpoint_for_test(&self) -> String {
        self.endpoint()
    }
}
