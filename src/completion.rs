//! Hosted LLM completion collaborator.
//!
//! `ChatCompletionsClient` speaks the OpenAI-compatible `/chat/completions`
//! protocol, which Together (the default) and OpenAI both serve.

use crate::creativity::Temperature;
use crate::prompt::PromptPayload;
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A single text-in/text-out call against a hosted model.
///
/// The model identifier is fixed when the client is built.
pub trait CompletionClient {
    fn complete(
        &self,
        prompt: &PromptPayload,
        temperature: Temperature,
    ) -> impl Future<Output = Result<String, CompletionError>>;
}

#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatCompletionsClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: "https://api.together.xyz/v1".into(),
            model: model.into(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl CompletionClient for ChatCompletionsClient {
    #[tracing::instrument(skip_all, fields(model = %self.model, temperature = temperature.value()))]
    async fn complete(
        &self,
        prompt: &PromptPayload,
        temperature: Temperature,
    ) -> Result<String, CompletionError> {
        let body = serde_json::json!({
            "model": self.model,
            "temperature": temperature.value(),
            "messages": [
                {
                    "role": "user",
                    "content": prompt.as_str()
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            tracing::error!(status, %message, "Completion service returned an error");
            return Err(CompletionError::Api { status, message });
        }

        let response = resp
            .json::<CompletionResponse>()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::Malformed("no choices in response".into()))?;
        tracing::debug!(finish_reason = ?choice.finish_reason, "Completion received");

        choice
            .message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| CompletionError::Malformed("no content in response".into()))
    }
}

impl<T: CompletionClient> CompletionClient for &T {
    fn complete(
        &self,
        prompt: &PromptPayload,
        temperature: Temperature,
    ) -> impl Future<Output = Result<String, CompletionError>> {
        (**self).complete(prompt, temperature)
    }
}
