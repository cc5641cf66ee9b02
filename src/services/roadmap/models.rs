//! Roadmap Service Models
//!
//! Provider settings and the error taxonomy of a roadmap generation.

use std::fmt;

use crate::models::query_length_message;

// ============================================================================
// Provider Settings
// ============================================================================

/// Connection settings for the generative model endpoint.
///
/// Built once from configuration at startup and handed to the client.
#[derive(Clone)]
pub struct LlmSettings {
    pub api_base: String,
    pub model: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub temperature: Option<f64>,
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Coarse failure category, the granularity callers need for messaging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidRequest,
    Transport,
    EmptyResponse,
    InvalidFormat,
    SchemaMismatch,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Transport => "transport",
            Self::EmptyResponse => "empty_response",
            Self::InvalidFormat => "invalid_format",
            Self::SchemaMismatch => "schema_mismatch",
        }
    }
}

/// Roadmap generation errors
#[derive(Debug, thiserror::Error)]
pub enum RoadmapError {
    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    #[error("Generative model API key not configured")]
    MissingApiKey,

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Generation timed out after {0}s")]
    Timeout(u64),

    #[error("Generation rate limited, retry after {0}s")]
    RateLimited(u64),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Model response is not valid JSON: {0}")]
    InvalidResponseFormat(String),

    #[error("Model response does not match the roadmap schema: {0}")]
    SchemaMismatch(String),
}

/// Shown when the request carries no usable query
pub const MISSING_QUERY_MESSAGE: &str = "请输入要分析的书名或主题。";
const GENERIC_FAILURE_MESSAGE: &str = "生成学习路线图时出现了问题，请稍后再试。";
const EMPTY_RESPONSE_MESSAGE: &str = "未能生成学习路线图，请稍后再试。";
const INVALID_FORMAT_MESSAGE: &str = "AI 返回的数据格式无效，请稍后再试。";

impl RoadmapError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidRequest(_) => FailureKind::InvalidRequest,
            Self::MissingApiKey
            | Self::GenerationFailed(_)
            | Self::Timeout(_)
            | Self::RateLimited(_) => FailureKind::Transport,
            Self::EmptyResponse => FailureKind::EmptyResponse,
            Self::InvalidResponseFormat(_) => FailureKind::InvalidFormat,
            Self::SchemaMismatch(_) => FailureKind::SchemaMismatch,
        }
    }

    /// Localized message for the end user.
    ///
    /// Malformed and mis-shaped payloads share one message and never echo
    /// the payload itself.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => msg.clone(),
            Self::MissingApiKey => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::GenerationFailed(msg) if !msg.trim().is_empty() => {
                format!("生成学习路线图时出现了问题：{}", msg)
            },
            Self::GenerationFailed(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::Timeout(secs) => format!("请求超时（{} 秒），请稍后再试。", secs),
            Self::RateLimited(secs) => format!("请求过于频繁，请在 {} 秒后再试。", secs),
            Self::EmptyResponse => EMPTY_RESPONSE_MESSAGE.to_string(),
            Self::InvalidResponseFormat(_) | Self::SchemaMismatch(_) => {
                INVALID_FORMAT_MESSAGE.to_string()
            },
        }
    }
}

impl From<validator::ValidationErrors> for RoadmapError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = if errors.field_errors().contains_key("query") {
            query_length_message()
        } else {
            MISSING_QUERY_MESSAGE.to_string()
        };
        Self::InvalidRequest(message)
    }
}
