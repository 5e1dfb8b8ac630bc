//! In-memory message store for tests and throwaway sessions

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{watch, RwLock};

use crate::application::errors::StorageError;
use crate::domain::entities::Message;
use crate::domain::traits::MessageStore;

pub struct MemoryStore {
    messages: RwLock<HashMap<String, Vec<Message>>>,
    revision: watch::Sender<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            messages: RwLock::new(HashMap::new()),
            revision,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn append(&self, message: &Message) -> Result<(), StorageError> {
        {
            let mut messages = self.messages.write().await;
            messages
                .entry(message.conversation.clone())
                .or_default()
                .push(message.clone());
        }

        self.revision.send_modify(|r| *r += 1);
        Ok(())
    }

    async fn load(&self, conversation: &str) -> Result<Vec<Message>, StorageError> {
        let messages = self.messages.read().await;
        let mut result = messages.get(conversation).cloned().unwrap_or_default();
        result.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(result)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn load_sorts_by_timestamp() {
        let store = MemoryStore::new();
        let early = Message::user("default-chat", "early")
            .with_timestamp(Utc.timestamp_opt(1, 0).unwrap());
        let late = Message::user("default-chat", "late")
            .with_timestamp(Utc.timestamp_opt(2, 0).unwrap());

        store.append(&late).await.unwrap();
        store.append(&early).await.unwrap();

        let loaded = store.load("default-chat").await.unwrap();
        assert_eq!(loaded[0].text, "early");
        assert_eq!(loaded[1].text, "late");
    }

    #[tokio::test]
    async fn subscription_sees_every_append() {
        let store = MemoryStore::new();
        let mut updates = store.subscribe();

        store.append(&Message::user("default-chat", "x")).await.unwrap();
        updates.changed().await.unwrap();
        assert_eq!(*updates.borrow(), 1);
    }
}
