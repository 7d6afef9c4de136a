//! Progress notification port
//!
//! Defines the interface for reporting progress while a batch of questions
//! is answered.

use riddle_domain::{AnswerRecord, Question, Stage};

/// Callback for progress updates during a run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain lines, nothing).
pub trait PipelineProgress: Send + Sync {
    /// Called before the first question
    fn on_run_start(&self, _total: usize) {}

    /// Called when a question starts (`index` is zero-based)
    fn on_question_start(&self, index: usize, total: usize, question: &Question);

    /// Called when a pipeline stage starts for the current question
    fn on_stage(&self, _stage: Stage) {}

    /// Called after the answer for the current question has been persisted
    fn on_question_complete(&self, index: usize, record: &AnswerRecord);

    /// Called after the trace log has been written
    fn on_run_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PipelineProgress for NoProgress {
    fn on_question_start(&self, _index: usize, _total: usize, _question: &Question) {}
    fn on_question_complete(&self, _index: usize, _record: &AnswerRecord) {}
}
