//! Canned local responder for offline development and missing credentials.

use crate::chat::{ChatChoice, ChatMessage, ChatResponse};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Simulated network latency before the canned reply resolves.
const RESPONSE_DELAY: Duration = Duration::from_millis(600);

const CANNED_REPLY: &str = "I'm analyzing your question and searching through relevant legal \
resources. As your legal AI assistant, I can help with document drafting, legal research, and \
providing insights on your matters. Would you like me to elaborate on any specific aspect of \
your query?";

/// Produces a canned assistant reply after a short simulated delay.
///
/// Shape-identical to a real completion so callers cannot tell the paths
/// apart; this path never fails.
pub async fn mock_response() -> ChatResponse {
    tokio::time::sleep(RESPONSE_DELAY).await;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    ChatResponse {
        id: now.as_millis().to_string(),
        created: now.as_secs(),
        model: "mock".to_string(),
        choices: vec![ChatChoice {
            message: ChatMessage::assistant(CANNED_REPLY),
            finish_reason: "stop".to_string(),
        }],
    }
}
