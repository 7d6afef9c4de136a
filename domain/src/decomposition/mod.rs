//! Decomposition subdomain: core question, search keywords and sub-queries.
//!
//! The LLM-assisted half of each routine lives in the application layer;
//! this module owns everything deterministic: output parsing, validation,
//! and the regex fallbacks used when the model output is unusable.

pub mod entities;
pub mod parsing;

pub use entities::{DecompositionResult, Extracted, ExtractionSource};
