//! Terminal front-end for the conversation thread

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::errors::ChatError;
use crate::application::services::ChatService;
use crate::application::thread::ChatThread;
use crate::domain::entities::Message;
use crate::domain::traits::MessageStore;

/// Interactive console loop over the thread projection
///
/// Listens on two sources at once: stdin lines and the store's revision
/// channel. Each revision change reloads the full history and prints whatever
/// the last render hadn't seen yet, so replies appear as soon as they are
/// persisted, not when the send task returns.
pub struct ConsoleFrontend {
    store: Arc<dyn MessageStore>,
    service: Arc<ChatService>,
    thread: ChatThread,
    printed: usize,
    welcome_shown: bool,
}

impl ConsoleFrontend {
    pub fn new(
        store: Arc<dyn MessageStore>,
        service: Arc<ChatService>,
        welcome: impl Into<String>,
    ) -> Self {
        let thread = ChatThread::new(service.conversation(), welcome);
        Self {
            store,
            service,
            thread,
            printed: 0,
            welcome_shown: false,
        }
    }

    pub async fn run(mut self) -> Result<(), ChatError> {
        let mut updates = self.store.subscribe();

        self.refresh().await;
        println!("Type a message and press Enter (Ctrl-D to quit).");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.refresh().await;
                }
                line = lines.next_line() => {
                    match line {
                        Ok(Some(input)) => self.submit(input),
                        Ok(None) => break,
                        Err(e) => {
                            tracing::warn!("stdin error: {}", e);
                            break;
                        }
                    }
                }
            }
        }

        // Receiver drops here, releasing the subscription
        Ok(())
    }

    fn submit(&self, input: String) {
        if input.trim().is_empty() {
            return;
        }
        if self.service.is_pending() {
            tracing::debug!("input ignored while a reply is pending");
            return;
        }

        println!("[assistant is thinking...]");
        let service = self.service.clone();
        tokio::spawn(async move {
            service.send(&input).await;
        });
    }

    async fn refresh(&mut self) {
        match self.store.load(self.service.conversation()).await {
            Ok(messages) => {
                self.thread.replace(messages);
                self.render_new();
            }
            Err(e) => tracing::warn!("failed to load chat history: {}", e),
        }
    }

    /// Print entries the previous render hadn't seen. The store is
    /// append-only, so the printed prefix of any snapshot is stable.
    fn render_new(&mut self) {
        if self.thread.is_empty() {
            if !self.welcome_shown {
                for entry in self.thread.entries() {
                    println!("{}", format_message(entry));
                }
                self.welcome_shown = true;
            }
            return;
        }

        let messages = self.thread.messages();
        for message in &messages[self.printed..] {
            println!("{}", format_message(message));
        }
        self.printed = messages.len();
    }
}

fn format_message(message: &Message) -> String {
    let author = if message.from_user { "you" } else { "assistant" };
    let time = message.timestamp.with_timezone(&chrono::Local).format("%H:%M");
    format!("[{} {}] {}", time, author, message.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn format_shows_author_and_text() {
        let message = Message::user("default-chat", "hello")
            .with_timestamp(Utc.timestamp_opt(0, 0).unwrap());
        let line = format_message(&message);
        assert!(line.contains("you"));
        assert!(line.ends_with("hello"));

        let reply = Message::assistant("default-chat", "hi")
            .with_timestamp(Utc.timestamp_opt(0, 0).unwrap());
        assert!(format_message(&reply).contains("assistant"));
    }
}
