//! Fixed assistant persona prepended to every real conversation.

use crate::chat::{ChatMessage, ChatRole};

// Template embedded at compile time
pub const SYSTEM_PROMPT: &str = include_str!("../templates/system_prompt.txt");

/// Returns the conversation with the standard system prompt prepended,
/// unless the conversation already opens with a system message.
///
/// Idempotent: applying it twice never double-prepends.
#[must_use]
pub fn with_system_prompt(history: &[ChatMessage]) -> Vec<ChatMessage> {
    match history.first() {
        Some(first) if first.role == ChatRole::System => history.to_vec(),
        _ => {
            let mut messages = Vec::with_capacity(history.len() + 1);
            messages.push(ChatMessage::system(SYSTEM_PROMPT));
            messages.extend_from_slice(history);
            messages
        }
    }
}
