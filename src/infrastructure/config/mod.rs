//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;

/// Chat client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub chat: ChatConfig,
    pub completion: CompletionConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChatConfig {
    /// Conversation id the client is bound to
    pub conversation: String,
    /// Shown in place of an empty history; never persisted
    pub welcome: String,
    /// Persisted as the reply when the completion endpoint fails
    pub fallback_reply: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CompletionConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chat: ChatConfig {
                conversation: "default-chat".to_string(),
                welcome: "Hi! I'm your AI assistant. How can I help you today?".to_string(),
                fallback_reply:
                    "Sorry, I couldn't reach the assistant. Make sure the backend is running."
                        .to_string(),
            },
            completion: CompletionConfig {
                endpoint: "http://localhost:8000/chat".to_string(),
                timeout_seconds: 30,
            },
            store: StoreConfig {
                path: PathBuf::from("parlor.db"),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(endpoint) = std::env::var("PARLOR_ENDPOINT") {
            config.completion.endpoint = endpoint;
        }

        if let Ok(path) = std::env::var("PARLOR_DB") {
            config.store.path = PathBuf::from(path);
        }

        if let Ok(conversation) = std::env::var("PARLOR_CONVERSATION") {
            config.chat.conversation = conversation;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.chat.conversation, "default-chat");
        assert_eq!(parsed.completion.endpoint, "http://localhost:8000/chat");
    }

    #[test]
    fn keys_are_kebab_case() {
        let yaml = r#"
chat:
  conversation: work-notes
  welcome: hello
  fallback-reply: oops
completion:
  endpoint: http://localhost:9000/chat
  timeout-seconds: 5
store:
  path: /tmp/messages.db
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.chat.conversation, "work-notes");
        assert_eq!(config.chat.fallback_reply, "oops");
        assert_eq!(config.completion.timeout_seconds, 5);
    }
}
