//! Sqlite-backed message store

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use tokio::sync::watch;

use crate::application::errors::StorageError;
use crate::domain::entities::Message;
use crate::domain::traits::MessageStore;

/// Durable message store on a single sqlite file
///
/// Timestamps are stored as fixed-width RFC 3339 UTC strings so the SQL
/// ordering is chronological.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    revision: watch::Sender<u64>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        init_tables(&conn)?;
        let (revision, _) = watch::channel(0);
        Ok(Self {
            conn: Mutex::new(conn),
            revision,
        })
    }
}

fn init_tables(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS messages (
            id TEXT PRIMARY KEY,
            conversation TEXT NOT NULL,
            text TEXT NOT NULL,
            from_user INTEGER NOT NULL,
            timestamp TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_messages_conversation
         ON messages(conversation, timestamp)",
        [],
    )?;

    Ok(())
}

fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::Serialization(format!("bad timestamp '{}': {}", raw, e)))
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn append(&self, message: &Message) -> Result<(), StorageError> {
        {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                "INSERT INTO messages (id, conversation, text, from_user, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    message.id,
                    message.conversation,
                    message.text,
                    message.from_user as i64,
                    encode_timestamp(message.timestamp),
                ],
            )?;
        }

        self.revision.send_modify(|r| *r += 1);
        Ok(())
    }

    async fn load(&self, conversation: &str) -> Result<Vec<Message>, StorageError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, conversation, text, from_user, timestamp
             FROM messages
             WHERE conversation = ?1
             ORDER BY timestamp ASC, id ASC",
        )?;

        let rows = stmt.query_map([conversation], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut messages = Vec::new();
        for row in rows {
            let (id, conversation, text, from_user, timestamp) = row?;
            messages.push(Message {
                id,
                conversation,
                text,
                from_user: from_user != 0,
                timestamp: decode_timestamp(&timestamp)?,
            });
        }
        Ok(messages)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
