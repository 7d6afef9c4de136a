//! Answer entities and the quality gate

use super::normalizer::clean_answer_aggressive;
use crate::core::string::char_len;
use serde::{Deserialize, Serialize};

/// Substrings that reveal the model narrating its sources instead of answering.
///
/// Checked case-sensitively against the cleaned answer.
pub const LEAKAGE_MARKERS: &[&str] = &["according", "based on", "information", "reference"];

/// Output written when the answer generator fails outright.
pub const ERROR_MARKER: &str = "ERROR";

/// Output written when the answer generator returns no completion.
pub const GENERATION_FAILED_MARKER: &str = "GENERATION_FAILED";

const MIN_ANSWER_CHARS: usize = 2;

/// A generated answer: the raw completion and its normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub raw: String,
    pub cleaned: String,
}

impl Answer {
    /// Build an answer from a raw completion, normalizing it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let cleaned = clean_answer_aggressive(&raw);
        Self { raw, cleaned }
    }

    /// Whether the quality gate should trigger a retry for this answer.
    pub fn needs_retry(&self) -> bool {
        is_low_quality(&self.cleaned)
    }
}

/// Quality gate: too short, or leaking boilerplate about the sources.
pub fn is_low_quality(cleaned: &str) -> bool {
    char_len(cleaned) < MIN_ANSWER_CHARS
        || LEAKAGE_MARKERS
            .iter()
            .any(|marker| cleaned.contains(marker))
}

/// One line of the primary output stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: String,
    pub output_field: String,
}

impl AnswerRecord {
    pub fn new(id: impl Into<String>, output_field: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            output_field: output_field.into(),
        }
    }

    /// Whether the output is one of the failure markers rather than an answer.
    pub fn is_error_marker(&self) -> bool {
        self.output_field == ERROR_MARKER || self.output_field == GENERATION_FAILED_MARKER
    }
}
