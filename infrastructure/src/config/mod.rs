//! Configuration loading for riddle-rag
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TARGET_MODEL` / `OPENAI_BASE_URL` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./riddle.toml` or `./.riddle.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/riddle-rag/config.toml`
//! 5. Default values
//!
//! API keys are read separately by [`Credentials`] and never come from a file.

mod credentials;
mod file_config;
mod loader;

pub use credentials::{CREDENTIAL_VARS, Credentials, GoogleCredentials};
pub use file_config::{
    ConfigValidationError, FileConfig, FileGeneratorConfig, FilePathsConfig, FilePipelineConfig,
    FileSearchConfig, SearchProviderKind,
};
pub use loader::ConfigLoader;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling the runtime configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),

    #[error("Missing environment variable {0}")]
    MissingCredential(&'static str),
}
