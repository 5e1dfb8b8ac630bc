use async_trait::async_trait;
use tokio::sync::watch;

use crate::application::errors::StorageError;
use crate::domain::entities::Message;

/// MessageStore trait - abstraction for the conversation's message collection
///
/// Writes are append-only. `load` returns messages in ascending timestamp
/// order (stable id tiebreak). `subscribe` hands out a revision watch channel
/// that changes after every successful append; dropping the receiver releases
/// the subscription.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn append(&self, message: &Message) -> Result<(), StorageError>;

    async fn load(&self, conversation: &str) -> Result<Vec<Message>, StorageError>;

    fn subscribe(&self) -> watch::Receiver<u64>;
}
