use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::entities::Message;
use crate::domain::traits::MessageStore;
use crate::infrastructure::completion::Completion;

/// What happened to a submitted input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The sequence ran to completion (reply or fallback persisted)
    Sent,
    /// Blank input, or another send was already in flight
    Ignored,
}

/// Service driving the send sequence for one conversation
///
/// The sequence is: persist the user's turn, ask the completion endpoint for
/// a reply, persist the reply (the configured fallback text when the endpoint
/// fails). The pending flag admits one sequence at a time; both failure
/// points are swallowed here so the front-end always returns to idle.
pub struct ChatService {
    store: Arc<dyn MessageStore>,
    completion: Arc<dyn Completion>,
    conversation: String,
    fallback_reply: String,
    pending: AtomicBool,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn MessageStore>,
        completion: Arc<dyn Completion>,
        conversation: impl Into<String>,
        fallback_reply: impl Into<String>,
    ) -> Self {
        Self {
            store,
            completion,
            conversation: conversation.into(),
            fallback_reply: fallback_reply.into(),
            pending: AtomicBool::new(false),
        }
    }

    /// True strictly while a send sequence is in flight
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    pub fn conversation(&self) -> &str {
        &self.conversation
    }

    /// Run the send sequence for one input line. Never returns an error:
    /// store-write failures are logged and completion failures fall back to
    /// the configured reply text.
    pub async fn send(&self, input: &str) -> SendOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("send already in flight, dropping input");
            return SendOutcome::Ignored;
        }

        self.persist(Message::user(&self.conversation, text)).await;

        let reply = match self.completion.complete(text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("completion request failed: {}", e);
                self.fallback_reply.clone()
            }
        };

        self.persist(Message::assistant(&self.conversation, reply))
            .await;

        self.pending.store(false, Ordering::SeqCst);
        SendOutcome::Sent
    }

    async fn persist(&self, message: Message) {
        if let Err(e) = self.store.append(&message).await {
            tracing::warn!("failed to save message: {}", e);
        }
    }
}
