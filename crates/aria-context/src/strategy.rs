use async_trait::async_trait;
use aria_llm::Message;
use aria_types::ConversationContext;

use crate::error::ContextError;

/// System prompt plus prior turns, ready to send to the model
#[derive(Debug, Clone)]
pub struct ContextWindow {
    pub system_prompt: String,
    pub messages: Vec<Message>,
}

impl ContextWindow {
    /// System prompt, history, then the new user message
    pub fn into_messages(self, user_message: impl Into<String>) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.messages.len() + 2);
        messages.push(Message::system(self.system_prompt));
        messages.extend(self.messages);
        messages.push(Message::human(user_message.into()));
        messages
    }
}

/// Source of the per-call user snapshot
#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn build(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<ConversationContext, ContextError>;
}
