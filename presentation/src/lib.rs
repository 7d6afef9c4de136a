//! Presentation layer for riddle-rag
//!
//! This crate contains the CLI definition, progress reporters,
//! and the end-of-run summary formatter.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::summary::SummaryFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
