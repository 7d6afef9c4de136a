//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`PipelineParams`]: per-question pipeline limits and rate-limit delays

pub mod pipeline_params;

pub use pipeline_params::PipelineParams;
