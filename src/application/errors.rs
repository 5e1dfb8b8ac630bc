//! Application layer errors

use thiserror::Error;

/// General chat client errors
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

/// Completion endpoint errors
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Endpoint error: {0}")]
    Endpoint(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
