//! Generation backend client
//!
//! One outbound HTTP call per invocation against an OpenAI-compatible
//! chat-completions endpoint. The invoker performs no retries; recovery
//! from failure is the response resolver's job.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::GenerationConfig;

/// Fixed generation settings per flow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationSettings {
    pub const CONTENT: Self = Self { temperature: 0.8, max_output_tokens: 2500 };
    pub const LEARNING_PATH: Self = Self { temperature: 0.7, max_output_tokens: 2000 };
    pub const PROGRESS: Self = Self { temperature: 0.6, max_output_tokens: 2000 };
    pub const REMEDIATION: Self = Self { temperature: 0.3, max_output_tokens: 512 };
    pub const ASSESSMENT: Self = Self { temperature: 0.7, max_output_tokens: 1500 };
    pub const CURRICULUM: Self = Self { temperature: 0.6, max_output_tokens: 1500 };
    pub const CHAT: Self = Self { temperature: 0.7, max_output_tokens: 512 };
}

/// Failure modes of a single generation call
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The backend could not be reached (network, timeout, quota)
    #[error("generation backend unreachable: {0}")]
    Unavailable(String),
    /// The backend answered with a non-success status
    #[error("generation backend error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// A text-generation backend. Implementations make exactly one attempt per
/// call and surface failures as [`GenerationError`]; they never retry.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, GenerationError>;
}

// ============ HTTP implementation ============

/// Configuration for the hosted provider endpoint
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL for the API (e.g., "https://openrouter.ai/api/v1")
    pub base_url: String,
    /// API key for authentication
    pub api_key: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Extra headers to include in requests (e.g., X-Title, HTTP-Referer)
    pub extra_headers: Vec<(String, String)>,
}

impl ProviderConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            extra_headers: vec![("X-Title".to_string(), "AptX Engine".to_string())],
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Production [`GenerationBackend`] over an OpenAI-compatible provider
#[derive(Clone)]
pub struct HttpBackend {
    client: Arc<Client>,
    provider: ProviderConfig,
}

impl HttpBackend {
    /// Build a backend with a caller-imposed request timeout.
    pub fn new(provider: ProviderConfig, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client: Arc::new(client),
            provider,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        let provider = ProviderConfig::new(
            config.base_url.clone(),
            config.resolve_api_key().unwrap_or_default(),
            config.model.clone(),
        );
        Self::new(provider, Duration::from_secs(config.timeout_secs))
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, GenerationError> {
        let request = ChatCompletionRequest {
            model: &self.provider.model,
            messages: vec![WireMessage { role: "user", content: prompt }],
            max_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.provider.base_url))
            .header("Authorization", format!("Bearer {}", self.provider.api_key));
        for (key, value) in &self.provider.extra_headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;
        debug!(bytes = body.len(), "generation backend responded");

        // Parse as raw Value first; providers disagree on the exact message
        // shape, so navigate by path instead of a rigid struct.
        let raw: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            GenerationError::Api {
                status: status.as_u16(),
                body: format!("unparseable response body: {}", e),
            }
        })?;

        Ok(extract_content(&raw))
    }
}

/// Extract assistant text from `choices[0].message.content`, which arrives
/// either as a plain string or as an array of content parts.
fn extract_content(raw: &serde_json::Value) -> String {
    let content = raw
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"));

    match content {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(parts)) => parts
            .iter()
            .filter_map(|part| {
                if part.get("type").and_then(|t| t.as_str()) == Some("text") {
                    part.get("text").and_then(|t| t.as_str()).map(str::to_string)
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    }
}
