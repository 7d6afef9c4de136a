//! Pipeline parameters: per-question limits and pacing.
//!
//! [`PipelineParams`] groups the static parameters used by
//! [`AnswerQuestionUseCase`](crate::use_cases::answer_question::AnswerQuestionUseCase)
//! and [`RunBatchUseCase`](crate::use_cases::run_batch::RunBatchUseCase).
//! Built once at startup from the loaded configuration and never mutated.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pipeline limits and static rate-limit delays.
///
/// The delays are fixed pauses after remote calls; they are not informed by
/// any response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Results requested from the search provider.
    pub top_k: usize,
    /// References aggregated into the document list.
    pub max_references: usize,
    /// Sentences kept as answer context.
    pub max_sentences: usize,
    /// Pause after each decomposition model call.
    pub call_delay: Duration,
    /// Pause after each search call.
    pub search_delay: Duration,
    /// Pause between consecutive questions.
    pub question_delay: Duration,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            top_k: 10,
            max_references: 5,
            max_sentences: 2,
            call_delay: Duration::from_millis(200),
            search_delay: Duration::from_millis(300),
            question_delay: Duration::from_millis(500),
        }
    }
}

impl PipelineParams {
    // ==================== Builder Methods ====================

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_max_references(mut self, max: usize) -> Self {
        self.max_references = max;
        self
    }

    pub fn with_max_sentences(mut self, max: usize) -> Self {
        self.max_sentences = max;
        self
    }

    pub fn with_delays(mut self, call: Duration, search: Duration, question: Duration) -> Self {
        self.call_delay = call;
        self.search_delay = search;
        self.question_delay = question;
        self
    }

    /// Same limits, no pauses.
    pub fn without_delays(self) -> Self {
        self.with_delays(Duration::ZERO, Duration::ZERO, Duration::ZERO)
    }
}

/// Sleep for `delay` unless it is zero.
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
