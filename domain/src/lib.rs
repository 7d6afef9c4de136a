//! Domain layer for riddle-rag
//!
//! This crate contains the deterministic core of the answering pipeline:
//! entities, output parsers, heuristics and text transforms. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Decomposition**: a riddle-style question is reduced to its core
//!   question, a handful of search keywords and entity-grouped sub-queries
//! - **Relevance**: retrieved snippets are cut into sentences and ranked by
//!   keyword overlap with the question
//! - **Normalization**: the model's answer is stripped down to a short
//!   canonical form comparable against a gold label

pub mod answer;
pub mod core;
pub mod decomposition;
pub mod prompt;
pub mod relevance;
pub mod search;
pub mod trace;

// Re-export commonly used types
pub use answer::{
    entities::{
        Answer, AnswerRecord, ERROR_MARKER, GENERATION_FAILED_MARKER, LEAKAGE_MARKERS,
        is_low_quality,
    },
    normalizer::clean_answer_aggressive,
};
pub use core::question::Question;
pub use decomposition::{DecompositionResult, Extracted, ExtractionSource};
pub use prompt::{Prompt, PromptTemplate};
pub use relevance::{RankedSentence, extract_relevant_sentences};
pub use search::{Reference, SearchResponse};
pub use trace::{
    AnswerComparison, ReferenceSummary, SearchTrace, Stage, TraceRecord, TraceSteps,
};
