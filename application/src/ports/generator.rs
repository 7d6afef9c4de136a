//! Generator port
//!
//! Defines the interface for requesting completions from a language model.

use async_trait::async_trait;
use riddle_domain::Prompt;
use thiserror::Error;

/// Errors that can occur during generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Language model backend
///
/// This port defines how the application layer obtains completions.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate one completion per prompt, in prompt order.
    async fn generate(&self, prompts: &[Prompt]) -> Result<Vec<String>, GeneratorError>;

    /// Generate a completion for a single prompt.
    ///
    /// Returns `Ok(None)` when the backend answered with no completion.
    async fn generate_one(&self, prompt: Prompt) -> Result<Option<String>, GeneratorError> {
        let outputs = self.generate(std::slice::from_ref(&prompt)).await?;
        Ok(outputs.into_iter().next())
    }
}
