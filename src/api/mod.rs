//! Outbound generation calls.
//!
//! [`ChatBackend`] is the provider seam; [`ReelsGenerator`] fans one topic
//! out to every configured model and collects the raw envelopes.

pub mod openai;

use crate::error::{IdeaError, Result};
use crate::prompt::build_reels_prompts;
use async_trait::async_trait;
use futures_util::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

pub use openai::OpenAiClient;

pub const DEFAULT_MODELS: [&str; 2] = ["gpt-4o", "gpt-4o-mini"];
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// One chat-completion call
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f64,
}

/// A text-generation provider returning its raw response envelope
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<Value>;
}

/// Outcome of the request sent to one model
#[derive(Debug)]
pub struct VariantResponse {
    pub model: String,
    pub outcome: Result<Value>,
}

pub struct ReelsGenerator {
    backend: Arc<dyn ChatBackend>,
    api_key: Option<String>,
    models: Vec<String>,
    temperature: f64,
}

impl ReelsGenerator {
    pub fn new(backend: Arc<dyn ChatBackend>, api_key: Option<String>, models: Vec<String>) -> Self {
        Self {
            backend,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            models,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Sends the reels prompt for `topic` to every model concurrently.
    ///
    /// Results are returned in model order. A failing model does not affect
    /// the others; only when all of them fail is the call an error.
    pub async fn generate(&self, topic: &str) -> Result<Vec<VariantResponse>> {
        let api_key = self.api_key.as_deref().ok_or(IdeaError::MissingCredential)?;
        if self.models.is_empty() {
            return Err(IdeaError::Config("No models configured".to_string()));
        }

        let prompts = build_reels_prompts(topic);
        info!("Generating reels ideas with {} model(s)", self.models.len());

        let calls = self.models.iter().map(|model| {
            let request = CompletionRequest {
                api_key,
                model,
                system: &prompts.system,
                user: &prompts.user,
                temperature: self.temperature,
            };
            let backend = Arc::clone(&self.backend);
            async move {
                let outcome = backend.complete(&request).await;
                VariantResponse {
                    model: model.clone(),
                    outcome,
                }
            }
        });
        let responses = join_all(calls).await;

        for response in &responses {
            if let Err(e) = &response.outcome {
                warn!("Model {} failed: {}", response.model, e);
            }
        }

        if responses.iter().all(|r| r.outcome.is_err()) {
            let reason = responses
                .into_iter()
                .find_map(|r| r.outcome.err())
                .map(|e| e.to_string())
                .unwrap_or_else(|| "all requests failed".to_string());
            return Err(IdeaError::RequestFailed(reason));
        }

        Ok(responses)
    }
}
