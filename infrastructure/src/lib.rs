//! Infrastructure layer for riddle-rag
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and input file loading.

pub mod config;
pub mod generator;
pub mod input;
pub mod logging;
pub mod output;
pub mod search;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, Credentials, FileConfig, SearchProviderKind,
};
pub use generator::{OpenAiGenerator, OpenAiGeneratorConfig};
pub use input::{InputError, load_questions};
pub use logging::TraceLogWriter;
pub use output::JsonlResultWriter;
pub use search::{
    BaiduSearchClient, GoogleSearchClient, SearchSetupError, build_search_provider,
    format_search_results,
};
