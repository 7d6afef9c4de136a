//! Generator configuration from TOML (`[generator]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion settings.
///
/// `TARGET_MODEL` and `OPENAI_BASE_URL` in the environment override
/// `model` and `base_url` (see [`ConfigLoader`](crate::config::ConfigLoader)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeneratorConfig {
    /// Model name sent with every request
    pub model: String,
    /// API base URL, without the `/chat/completions` suffix
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    /// Per-request timeout (default: 60)
    pub timeout_seconds: u64,
}

impl Default for FileGeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 50,
            temperature: 0.1,
            top_p: 0.9,
            timeout_seconds: 60,
        }
    }
}
