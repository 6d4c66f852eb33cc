// Chat transcript
// Append-only; entries are never edited or reordered after insertion.

use crate::models::ChatMessage;

/// Greeting shown before the first exchange
pub const WELCOME_MESSAGE: &str = "Hi! I'm your AI coding assistant. I can help you generate React components, refactor code, or answer any development questions. What would you like to build today?";

/// Assistant reply recorded when a generation fails
pub const RECOVERY_MESSAGE: &str =
    "I apologize, but I encountered an error. Please try again or rephrase your request.";

/// Assistant reply recorded when the assistant returned nothing
pub const EMPTY_REPLY_MESSAGE: &str = "The assistant returned no code.";

#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log seeded with the assistant greeting
    pub fn with_welcome() -> Self {
        let mut log = Self::new();
        log.append(ChatMessage::assistant(WELCOME_MESSAGE));
        log
    }

    pub fn append(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
