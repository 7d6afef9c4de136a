//! Application layer for riddle-rag
//!
//! This crate contains use cases, port definitions, and pipeline parameters.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::PipelineParams;
pub use ports::{
    generator::{Generator, GeneratorError},
    progress::{NoProgress, PipelineProgress},
    result_sink::{ResultSink, SinkError, TraceSink},
    search_provider::SearchProvider,
};
pub use use_cases::answer_question::{AnswerQuestionUseCase, QuestionOutcome};
pub use use_cases::decompose::{ExtractionStrategy, QuestionDecomposer, run_extraction};
pub use use_cases::run_batch::{RunBatchError, RunBatchUseCase, RunSummary};
