//! Pipeline configuration from TOML (`[pipeline]` section)

use riddle_application::PipelineParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// References requested from the search provider (default: 10)
    pub top_k: usize,
    /// References aggregated into documents (default: 5)
    pub max_references: usize,
    /// Sentences kept as answer context (default: 2)
    pub max_sentences: usize,
    /// Delay after each decomposition call (default: 200)
    pub call_delay_ms: u64,
    /// Delay after each search (default: 300)
    pub search_delay_ms: u64,
    /// Delay between questions (default: 500)
    pub question_delay_ms: u64,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        let params = PipelineParams::default();
        Self {
            top_k: params.top_k,
            max_references: params.max_references,
            max_sentences: params.max_sentences,
            call_delay_ms: params.call_delay.as_millis() as u64,
            search_delay_ms: params.search_delay.as_millis() as u64,
            question_delay_ms: params.question_delay.as_millis() as u64,
        }
    }
}

impl FilePipelineConfig {
    /// Convert into the application-layer parameters.
    pub fn to_params(&self) -> PipelineParams {
        PipelineParams::default()
            .with_top_k(self.top_k)
            .with_max_references(self.max_references)
            .with_max_sentences(self.max_sentences)
            .with_delays(
                Duration::from_millis(self.call_delay_ms),
                Duration::from_millis(self.search_delay_ms),
                Duration::from_millis(self.question_delay_ms),
            )
    }
}
