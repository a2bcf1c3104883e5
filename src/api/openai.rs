use crate::api::{ChatBackend, CompletionRequest};
use crate::error::{IdeaError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completion client for OpenAI-compatible endpoints
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdeaError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Request body for `POST /chat/completions`
pub fn completion_body(request: &CompletionRequest<'_>) -> Value {
    json!({
        "model": request.model,
        "messages": [
            {
                "role": "system",
                "content": request.system
            },
            {
                "role": "user",
                "content": request.user
            }
        ],
        "temperature": request.temperature
    })
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<Value> {
        info!("Requesting reels ideas from {}...", request.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", request.api_key))
            .header("Content-Type", "application/json")
            .json(&completion_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            warn!("{} returned HTTP {}", request.model, status);
            return Err(IdeaError::RequestFailed(format!(
                "{} API error (HTTP {}): {}",
                request.model, status, error_text
            )));
        }

        let response_json: Value = response.json().await?;
        info!("Received response from {}", request.model);
        Ok(response_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = OpenAiClient::new("http://localhost:8080/v1/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn body_carries_both_messages() {
        let request = CompletionRequest {
            api_key: "sk-test",
            model: "gpt-4o",
            system: "be helpful",
            user: "Topic: tea",
            temperature: 0.7,
        };
        let body = completion_body(&request);

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be helpful");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Topic: tea");
        assert!(body.get("api_key").is_none());
    }
}
