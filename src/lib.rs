//! # rainmaker-ai
//!
//! The AI chat orchestration core of the Rainmaker Law legal assistant.
//!
//! This library mediates all outbound "ask the assistant" requests for the
//! application: it owns the API-key/mode configuration, talks to the
//! OpenRouter chat-completions API on the real path, verifies candidate API
//! keys with a one-token probe, and degrades gracefully to a canned local
//! responder whenever no real backend is configured.
//!
//! ## Features
//!
//! - **Backend selection**: a single `send_message` surface that routes to
//!   OpenRouter or to the offline mock responder based on configuration
//! - **System-prompt injection**: the fixed legal-assistant persona is
//!   prepended to every real conversation, idempotently
//! - **Key verification**: format checks plus a minimal-cost probe request,
//!   always resolving into a result value rather than an error
//! - **Pluggable persistence**: configuration lives behind a small
//!   `ConfigStore` trait (JSON file in production, in-memory in tests)
//!
//! ## Library Usage
//!
//! To use rainmaker-ai as a library in your Rust application:
//!
//! ```toml
//! [dependencies]
//! rainmaker-ai = { version = "0.1", default-features = false }
//! ```
//!
//! ### Basic Example
//!
//! ```rust,no_run
//! use rainmaker_ai::{AiService, ChatMessage, FileStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // Configuration is hydrated from the store and persisted back on change.
//!     let service = AiService::new(Box::new(FileStore::new("rainmaker-ai.json")));
//!
//!     service.configure(Some("sk-or-your-key"), Some(true));
//!
//!     let history = vec![ChatMessage::user("Draft a mutual NDA outline")];
//!     let response = service.send_message(&history).await?;
//!
//!     println!("{}", response.choices[0].message.content);
//!     Ok(())
//! }
//! ```
//!
//! ### Offline Development
//!
//! Without a key (or with the real backend switched off) the service answers
//! from the mock responder — same response shape, no network:
//!
//! ```rust
//! use rainmaker_ai::{AiService, ChatMessage, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let service = AiService::new(Box::new(MemoryStore::new()));
//!
//!     let response = service.send_message(&[ChatMessage::user("Hi")]).await?;
//!     assert_eq!(response.model, "mock");
//!     Ok(())
//! }
//! ```
//!
//! ## Server Mode
//!
//! The `server` feature (enabled by default) provides a small actix-web REST
//! surface over the service:
//!
//! ```bash
//! cargo run
//! ```

// Core modules - always available
pub mod chat;
pub mod config;
pub mod error;
pub mod mock;
pub mod openrouter;
pub mod prompt;
pub mod service;

// Re-export commonly used types for easier access
pub use chat::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatRole, CompletionRequest};
pub use config::{ConfigStore, FileStore, MemoryStore, ServiceConfig};
pub use error::{AiError, ErrorResponse};
pub use openrouter::OpenRouterClient;
pub use service::{AiService, VerificationResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_role_serialization() {
        let role = ChatRole::User;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, r#""user""#);

        let role = ChatRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, r#""assistant""#);

        let role = ChatRole::System;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, r#""system""#);
    }

    #[test]
    fn test_chat_message_serialization() {
        let message = ChatMessage::user("Test message");

        let json = serde_json::to_string(&message).unwrap();
        let deserialized: ChatMessage = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.role, ChatRole::User);
        assert_eq!(deserialized.content, "Test message");
    }

    #[test]
    fn test_completion_request_wire_shape() {
        let request = CompletionRequest {
            model: "anthropic/claude-3-opus-20240229".to_string(),
            messages: vec![ChatMessage::user("Hi")],
            max_tokens: 4000,
            temperature: 0.7,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "anthropic/claude-3-opus-20240229");
        assert_eq!(value["max_tokens"], 4000);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn test_chat_response_deserialization() {
        let body = r#"{
            "id": "gen-abc",
            "created": 1700000000,
            "model": "anthropic/claude-3-opus-20240229",
            "choices": [{
                "message": { "role": "assistant", "content": "Hello" },
                "finish_reason": "stop"
            }]
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.id, "gen-abc");
        assert_eq!(response.created, 1_700_000_000);
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.content, "Hello");
    }

    #[test]
    fn test_verification_result_serialization() {
        let valid = serde_json::to_value(VerificationResult {
            is_valid: true,
            error: None,
        })
        .unwrap();
        assert_eq!(valid, serde_json::json!({"is_valid": true}));

        let invalid = serde_json::to_value(VerificationResult {
            is_valid: false,
            error: Some("API key is required".to_string()),
        })
        .unwrap();
        assert_eq!(invalid["error"], "API key is required");
    }

    #[test]
    fn test_chat_role_equality() {
        assert_eq!(ChatRole::User, ChatRole::User);
        assert_eq!(ChatRole::Assistant, ChatRole::Assistant);
        assert_eq!(ChatRole::System, ChatRole::System);
        assert_ne!(ChatRole::User, ChatRole::Assistant);
    }
}
