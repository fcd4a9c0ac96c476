use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Failures the real backend path can produce.
///
/// Missing configuration is not represented here: a disabled backend or
/// absent key routes to the mock responder instead of failing, and key
/// format problems are reported through `VerificationResult`.
#[derive(Debug)]
pub enum AiError {
    /// Non-2xx response from the provider, with the message extracted from
    /// its error body when parseable.
    Provider(String),
    /// No response obtained at all; the underlying cause is preserved.
    Transport(reqwest::Error),
    /// 2xx response whose body did not match the expected completion shape.
    MalformedResponse(String),
}

impl fmt::Display for AiError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            AiError::Provider(msg) => write!(f, "AI provider error: {msg}"),
            AiError::Transport(err) => write!(f, "AI request failed: {err}"),
            AiError::MalformedResponse(msg) => write!(f, "Malformed AI response: {msg}"),
        }
    }
}

impl std::error::Error for AiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        AiError::Transport(err)
    }
}

// Helper functions for creating specific error types
impl AiError {
    pub fn provider(msg: impl Into<String>) -> Self {
        AiError::Provider(msg.into())
    }

    pub fn malformed_response(msg: impl Into<String>) -> Self {
        AiError::MalformedResponse(msg.into())
    }
}

#[cfg(feature = "server")]
impl actix_web::ResponseError for AiError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let (status, error_type) = match self {
            AiError::Provider(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
            AiError::Transport(_) => (StatusCode::SERVICE_UNAVAILABLE, "TRANSPORT_ERROR"),
            AiError::MalformedResponse(_) => (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE"),
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        };

        actix_web::HttpResponse::build(status).json(error_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = AiError::provider("Invalid model requested");
        assert_eq!(err.to_string(), "AI provider error: Invalid model requested");
    }

    #[test]
    fn test_malformed_response_display() {
        let err = AiError::malformed_response("missing field `choices`");
        assert!(err.to_string().contains("missing field `choices`"));
    }

    #[test]
    fn test_error_response_structure() {
        let error = ErrorResponse {
            error: "PROVIDER_ERROR".to_string(),
            message: "Detailed message".to_string(),
            status_code: 502,
        };

        assert_eq!(error.error, "PROVIDER_ERROR");
        assert_eq!(error.message, "Detailed message");
        assert_eq!(error.status_code, 502);
    }
}
