//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; every section and field is optional.

mod generator;
mod paths;
mod pipeline;
mod search;

pub use generator::FileGeneratorConfig;
pub use paths::FilePathsConfig;
pub use pipeline::FilePipelineConfig;
pub use search::{FileSearchConfig, SearchProviderKind};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0}.timeout_seconds cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("pipeline.top_k cannot be 0")]
    InvalidTopK,

    #[error("pipeline.max_sentences cannot be 0")]
    InvalidMaxSentences,

    #[error("generator.model cannot be empty")]
    EmptyModelName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Per-question pipeline limits and delays
    pub pipeline: FilePipelineConfig,
    /// Answer generator settings
    pub generator: FileGeneratorConfig,
    /// Search provider settings
    pub search: FileSearchConfig,
    /// Input and output locations
    pub paths: FilePathsConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.generator.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("generator"));
        }
        if let Some(0) = self.search.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout("search"));
        }
        if self.pipeline.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK);
        }
        if self.pipeline.max_sentences == 0 {
            return Err(ConfigValidationError::InvalidMaxSentences);
        }
        if self.generator.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        Ok(())
    }
}
