//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod generator;
pub mod progress;
pub mod result_sink;
pub mod search_provider;
