//! The AI request service: configuration, backend selection, and dispatch.
//!
//! `AiService` mediates every outbound "ask the assistant" request. It hides
//! the choice between the real OpenRouter backend and the local mock
//! responder behind a single call surface, injects the standard system
//! prompt, and verifies candidate API keys with a minimal-cost probe.

use crate::chat::{ChatMessage, ChatResponse, CompletionRequest};
use crate::config::{API_KEY_STORAGE_KEY, ConfigStore, ServiceConfig, USE_REAL_AI_STORAGE_KEY};
use crate::error::AiError;
use crate::mock;
use crate::openrouter::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, OpenRouterClient};
use crate::prompt;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// OpenRouter keys start with this literal prefix.
const KEY_PREFIX: &str = "sk-or-";

/// Outcome of an API-key verification.
///
/// Verification never fails as a Rust error; every failure mode resolves
/// into this value.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VerificationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Mediates all assistant requests for one application instance.
///
/// The service holds the current [`ServiceConfig`] behind a lock and mirrors
/// every change to the injected [`ConfigStore`]. It has exactly two modes,
/// mock and real, determined by `(use_real_ai, api_key present)`; transitions
/// happen only through [`AiService::configure`]. Each request captures the
/// configuration once at call start, so a concurrent `configure` cannot
/// change a call's mode midway.
pub struct AiService {
    config: RwLock<ServiceConfig>,
    store: Box<dyn ConfigStore>,
    client: OpenRouterClient,
}

impl AiService {
    /// Creates a service hydrated from the given store, talking to the
    /// production OpenRouter endpoint.
    #[must_use]
    pub fn new(store: Box<dyn ConfigStore>) -> Self {
        Self::with_client(store, OpenRouterClient::new())
    }

    /// Creates a service with an explicit HTTP client, for non-default
    /// endpoints and tests.
    #[must_use]
    pub fn with_client(
        store: Box<dyn ConfigStore>,
        client: OpenRouterClient,
    ) -> Self {
        let config = ServiceConfig::load(store.as_ref());
        Self {
            config: RwLock::new(config),
            store,
            client,
        }
    }

    /// Partially updates the configuration; `None` fields keep their prior
    /// value. Each changed field is persisted to the store best-effort —
    /// a failing store never fails this call, the in-memory state still
    /// updates for the current process lifetime.
    pub fn configure(
        &self,
        api_key: Option<&str>,
        use_real_ai: Option<bool>,
    ) {
        let mut config = match self.config.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(key) = api_key {
            // An empty key counts as absent, same as when hydrating from the
            // store, so it can never route a request to the real backend.
            config.api_key = if key.is_empty() { None } else { Some(key.to_string()) };
            self.store.set(API_KEY_STORAGE_KEY, key);
        }

        if let Some(flag) = use_real_ai {
            config.use_real_ai = flag;
            self.store.set(USE_REAL_AI_STORAGE_KEY, if flag { "true" } else { "false" });
        }
    }

    /// Whether the next request would take the real path.
    #[must_use]
    pub fn is_using_real_ai(&self) -> bool {
        self.snapshot().is_real_mode()
    }

    /// Checks whether the provider accepts a candidate key.
    ///
    /// Blank or wrongly-prefixed keys are rejected synchronously without a
    /// network call; otherwise a one-token probe is issued with the
    /// candidate. All failure paths resolve into the result value.
    pub async fn verify_api_key(&self, candidate: &str) -> VerificationResult {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return VerificationResult::invalid("API key is required");
        }
        if !candidate.starts_with(KEY_PREFIX) {
            return VerificationResult::invalid(format!(
                "Invalid API key format: OpenRouter keys start with \"{KEY_PREFIX}\""
            ));
        }

        match self.client.probe(candidate).await {
            Ok(_) => VerificationResult::valid(),
            Err(AiError::Provider(message)) => {
                tracing::warn!("API key rejected by provider: {message}");
                VerificationResult::invalid(message)
            }
            Err(err) => {
                tracing::warn!("API key verification failed: {err}");
                VerificationResult::invalid(err.to_string())
            }
        }
    }

    /// Sends the conversation so far and returns the assistant's completion.
    ///
    /// `history` is the full conversation in turn order, without a prepended
    /// system message. When the real backend is disabled or no key is
    /// configured, the mock responder answers instead — same response shape,
    /// no network call, never fails. On the real path the standard system
    /// prompt is injected (idempotently) and the request goes to OpenRouter.
    ///
    /// # Errors
    ///
    /// Real-path failures propagate to the caller as [`AiError`] so it can
    /// render an apology message; there is no silent fallback to mock on
    /// failure. The mock path never errors.
    pub async fn send_message(&self, history: &[ChatMessage]) -> Result<ChatResponse, AiError> {
        // Capture configuration once so a racing configure() cannot change
        // this call's mode or key midway.
        let config = self.snapshot();

        let Some(api_key) = config.api_key.filter(|_| config.use_real_ai) else {
            tracing::debug!("real backend not configured, answering with mock responder");
            return Ok(mock::mock_response().await);
        };

        let request = CompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: prompt::with_system_prompt(history),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        };

        self.client.chat_completions(&api_key, &request).await
    }

    fn snapshot(&self) -> ServiceConfig {
        match self.config.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
