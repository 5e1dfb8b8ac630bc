use chrono::{DateTime, Utc};

/// One chat turn in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub conversation: String,
    pub text: String,
    pub from_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(conversation: impl Into<String>, text: impl Into<String>, from_user: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            conversation: conversation.into(),
            text: text.into(),
            from_user,
            timestamp: Utc::now(),
        }
    }

    /// A turn typed by the user
    pub fn user(conversation: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(conversation, text, true)
    }

    /// A turn produced by the assistant (including the fallback reply)
    pub fn assistant(conversation: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(conversation, text, false)
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
