//! Question value object

use serde::{Deserialize, Serialize};

/// A question to be answered by the pipeline (Value Object)
///
/// Loaded once from the input collection and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: String,
    text: String,
    expected_answer: Option<String>,
}

impl Question {
    /// Create a new question
    ///
    /// Blank text is accepted; the short-input passthroughs carry it
    /// through the pipeline so it still produces a record.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            expected_answer: None,
        }
    }

    /// Attach the gold label used for the end-of-run comparison
    pub fn with_expected_answer(mut self, answer: impl Into<String>) -> Self {
        self.expected_answer = Some(answer.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The original, undecomposed question text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expected_answer(&self) -> Option<&str> {
        self.expected_answer.as_deref()
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.id, self.text)
    }
}
