//! Conversation thread projection
//!
//! The thread is a disposable cache of the store's contents: every
//! subscription update replaces the whole list. The store owns ordering and
//! durability; this type only decides what the front-end gets to render.

use crate::domain::entities::Message;

/// In-memory view of one conversation
pub struct ChatThread {
    welcome: Message,
    messages: Vec<Message>,
}

impl ChatThread {
    pub fn new(conversation: impl Into<String>, welcome_text: impl Into<String>) -> Self {
        let conversation = conversation.into();
        Self {
            welcome: Message::assistant(&conversation, welcome_text),
            messages: Vec::new(),
        }
    }

    /// Replace the cached list with a fresh snapshot from the store
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Persisted messages only, in store order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// What the front-end renders: the welcome entry stands in for an empty
    /// store and disappears once real messages exist
    pub fn entries(&self) -> Vec<&Message> {
        if self.messages.is_empty() {
            vec![&self.welcome]
        } else {
            self.messages.iter().collect()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
