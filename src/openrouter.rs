//! HTTP client for the OpenRouter chat-completions endpoint.
//!
//! This module owns the wire-level concerns: authentication headers, the
//! request body, error-body parsing, and the minimal-cost verification probe.

use crate::chat::{ChatMessage, ChatResponse, CompletionRequest};
use crate::error::AiError;

/// Production chat-completions URL.
pub const DEFAULT_API_URL: &str = "https://api.openrouter.ai/api/v1/chat/completions";
/// Model identifier sent with every request.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3-opus-20240229";
/// Token ceiling for regular completions.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
/// Sampling temperature for all requests.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const REFERER: &str = "https://rainmaker-law.com";
const CLIENT_TITLE: &str = "Rainmaker Law AI Assistant";

pub struct OpenRouterClient {
    http: reqwest::Client,
    api_url: String,
}

impl OpenRouterClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }

    /// Client pointed at a non-default endpoint. Used by tests against a
    /// local mock server.
    #[must_use]
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    /// Issues a single chat-completions request with the given key.
    ///
    /// # Errors
    ///
    /// `AiError::Transport` when no response is obtained, `AiError::Provider`
    /// on a non-2xx response (carrying the provider's message when its error
    /// body is parseable), `AiError::MalformedResponse` when a 2xx body does
    /// not match the expected completion shape.
    pub async fn chat_completions(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<ChatResponse, AiError> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", CLIENT_TITLE)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body)
                .unwrap_or_else(|| format!("Failed to get AI response (status {status})"));
            tracing::error!("OpenRouter API error ({status}): {message}");
            return Err(AiError::provider(message));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| AiError::malformed_response(e.to_string()))
    }

    /// Minimal-cost probe: a one-token completion for a trivial prompt,
    /// issued solely to check whether the provider accepts the key.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::chat_completions`].
    pub async fn probe(&self, api_key: &str) -> Result<ChatResponse, AiError> {
        let request = CompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![ChatMessage::user("Hi")],
            max_tokens: 1,
            temperature: DEFAULT_TEMPERATURE,
        };

        self.chat_completions(api_key, &request).await
    }
}

impl Default for OpenRouterClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pulls the human-readable message out of an OpenRouter error body,
/// `{"error": {"message": "..."}}`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(ToString::to_string)
}
