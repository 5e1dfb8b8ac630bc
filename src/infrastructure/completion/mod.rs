//! Completion endpoint client
//!
//! The endpoint contract is a single POST: `{"message": <text>}` in,
//! `{"response": <text>}` out. No auth, no retries, no versioning.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::CompletionError;

/// Completion trait - one request, one generated reply
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, text: &str) -> Result<String, CompletionError>;
}

/// Request body
#[derive(Serialize)]
struct CompletionRequest<'a> {
    message: &'a str,
}

/// Response body
#[derive(Deserialize, Debug)]
struct CompletionResponse {
    response: String,
}

/// HTTP client for the completion endpoint
pub struct HttpCompletion {
    client: Client,
    endpoint: String,
}

impl HttpCompletion {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Completion for HttpCompletion {
    async fn complete(&self, text: &str) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&CompletionRequest { message: text })
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Endpoint(format!(
                "status: {}, body: {}",
                status, body
            )));
        }

        let reply: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_the_wire_format() {
        let body = serde_json::to_value(CompletionRequest { message: "hello" }).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "hello" }));
    }

    #[test]
    fn response_body_matches_the_wire_format() {
        let reply: CompletionResponse =
            serde_json::from_str(r#"{"response": "hi there"}"#).unwrap();
        assert_eq!(reply.response, "hi there");
    }

    #[test]
    fn extra_response_fields_are_ignored() {
        let reply: CompletionResponse =
            serde_json::from_str(r#"{"response": "ok", "model": "g-2.0"}"#).unwrap();
        assert_eq!(reply.response, "ok");
    }
}
