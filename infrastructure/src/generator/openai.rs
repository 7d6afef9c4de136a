//! OpenAI-compatible chat completion adapter
//!
//! Works with any endpoint that accepts the OpenAI `chat/completions`
//! request format (OpenAI itself, vLLM, DashScope compatible mode, ...).
//! Each prompt is sent as its own request, sequentially.

use crate::config::FileGeneratorConfig;
use async_trait::async_trait;
use riddle_application::ports::generator::{Generator, GeneratorError};
use riddle_domain::Prompt;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Settings for [`OpenAiGenerator`].
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiGeneratorConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub timeout: Duration,
}

impl OpenAiGeneratorConfig {
    pub fn from_file_config(config: &FileGeneratorConfig, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

/// [`Generator`] backed by an OpenAI-compatible HTTP API.
pub struct OpenAiGenerator {
    config: OpenAiGeneratorConfig,
    http: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(config: OpenAiGeneratorConfig) -> Result<Self, GeneratorError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeneratorError::ConnectionError(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    fn request_body<'a>(&'a self, prompt: &'a Prompt) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: chat_messages(prompt),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        }
    }

    /// Send one prompt; `Ok(None)` when the response carries no completion.
    async fn complete(&self, prompt: &Prompt) -> Result<Option<String>, GeneratorError> {
        debug!(model = %self.config.model, "sending chat completion request: {}", prompt);

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::RequestFailed(format!("HTTP {}: {}", status, body)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;
        Ok(parse_completion(&body))
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    /// Outputs stop at the first prompt the backend left unanswered, so the
    /// returned completions always line up with the leading prompts.
    async fn generate(&self, prompts: &[Prompt]) -> Result<Vec<String>, GeneratorError> {
        let mut outputs = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            match self.complete(prompt).await? {
                Some(text) => outputs.push(text),
                None => {
                    warn!("Chat completion response contained no message content");
                    break;
                }
            }
        }
        Ok(outputs)
    }
}

fn chat_messages(prompt: &Prompt) -> Vec<ChatMessage<'_>> {
    let system = prompt.system.as_deref().map(|content| ChatMessage {
        role: "system",
        content,
    });
    system
        .into_iter()
        .chain(std::iter::once(ChatMessage {
            role: "user",
            content: &prompt.user,
        }))
        .collect()
}

/// `choices[0].message.content`, if present.
fn parse_completion(body: &Value) -> Option<String> {
    body["choices"]
        .get(0)
        .and_then(|choice| choice["message"]["content"].as_str())
        .map(String::from)
}

fn map_transport_error(e: reqwest::Error) -> GeneratorError {
    if e.is_timeout() {
        GeneratorError::Timeout
    } else if e.is_connect() {
        GeneratorError::ConnectionError(e.to_string())
    } else {
        GeneratorError::RequestFailed(e.to_string())
    }
}
