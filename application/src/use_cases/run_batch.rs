//! Run Batch use case
//!
//! Drives [`AnswerQuestionUseCase`] over every input question in order,
//! persisting each answer before moving on and writing the trace log once
//! at the end.

use super::answer_question::AnswerQuestionUseCase;
use crate::config::pipeline_params::pause;
use crate::ports::generator::Generator;
use crate::ports::progress::{NoProgress, PipelineProgress};
use crate::ports::result_sink::{ResultSink, SinkError, TraceSink};
use crate::ports::search_provider::SearchProvider;
use riddle_domain::{Question, Stage, TraceRecord};
use thiserror::Error;
use tracing::{error, info};

/// Errors that abort a run
///
/// Per-question failures never show up here; only losing the ability to
/// persist results stops the batch.
#[derive(Error, Debug)]
pub enum RunBatchError {
    #[error("Failed to write answer for {id}: {source}")]
    ResultSink {
        id: String,
        #[source]
        source: SinkError,
    },

    #[error("Failed to write trace log: {0}")]
    TraceSink(#[source] SinkError),
}

/// Aggregate numbers for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Questions answered (one output record each)
    pub processed: usize,
    /// Questions that carried a gold label
    pub with_expected: usize,
    /// Questions whose final answer matched the gold label exactly
    pub correct: usize,
    /// Records holding a failure marker instead of an answer
    pub error_markers: usize,
    /// Decomposition steps that fell back to the heuristic
    pub fallback_extractions: usize,
}

impl RunSummary {
    fn record(&mut self, trace: &TraceRecord, is_error_marker: bool) {
        self.processed += 1;
        if trace.expected_answer.is_some() {
            self.with_expected += 1;
        }
        if trace.comparison.is_correct {
            self.correct += 1;
        }
        if is_error_marker {
            self.error_markers += 1;
        }
        let steps = &trace.steps;
        self.fallback_extractions += [
            steps.core_question.as_ref().is_some_and(|e| e.is_fallback()),
            steps.keywords.as_ref().is_some_and(|e| e.is_fallback()),
            steps.sub_queries.as_ref().is_some_and(|e| e.is_fallback()),
        ]
        .into_iter()
        .filter(|fell_back| *fell_back)
        .count();
    }

    /// Exact-match accuracy over labeled questions, if any were labeled.
    pub fn accuracy(&self) -> Option<f64> {
        (self.with_expected > 0).then(|| self.correct as f64 / self.with_expected as f64)
    }
}

/// Use case for answering a whole input batch
pub struct RunBatchUseCase<G: Generator + ?Sized, S: SearchProvider + ?Sized> {
    answer: AnswerQuestionUseCase<G, S>,
}

impl<G: Generator + ?Sized, S: SearchProvider + ?Sized> RunBatchUseCase<G, S> {
    pub fn new(answer: AnswerQuestionUseCase<G, S>) -> Self {
        Self { answer }
    }

    /// Execute the batch with default (no-op) progress
    pub async fn execute(
        &self,
        questions: &[Question],
        results: &mut dyn ResultSink,
        traces: &dyn TraceSink,
    ) -> Result<RunSummary, RunBatchError> {
        self.execute_with_progress(questions, results, traces, &NoProgress)
            .await
    }

    /// Execute the batch with progress callbacks
    pub async fn execute_with_progress(
        &self,
        questions: &[Question],
        results: &mut dyn ResultSink,
        traces: &dyn TraceSink,
        progress: &dyn PipelineProgress,
    ) -> Result<RunSummary, RunBatchError> {
        let total = questions.len();
        info!("Answering {} questions", total);
        progress.on_run_start(total);

        let mut summary = RunSummary::default();
        let mut trace_log = Vec::with_capacity(total);

        for (index, question) in questions.iter().enumerate() {
            info!("[{}/{}] {}", index + 1, total, question);
            progress.on_question_start(index, total, question);

            let outcome = self.answer.execute(question, progress).await;

            progress.on_stage(Stage::Persist);
            results
                .write_record(&outcome.record)
                .map_err(|source| RunBatchError::ResultSink {
                    id: outcome.record.id.clone(),
                    source,
                })?;
            progress.on_question_complete(index, &outcome.record);

            summary.record(&outcome.trace, outcome.record.is_error_marker());
            trace_log.push(outcome.trace);

            if index + 1 < total {
                pause(self.answer.params().question_delay).await;
            }
        }

        traces.write_all(&trace_log).map_err(|e| {
            error!("Trace log could not be written: {}", e);
            RunBatchError::TraceSink(e)
        })?;
        progress.on_run_complete();

        info!(
            "Run complete: {} processed, {} correct of {} labeled",
            summary.processed, summary.correct, summary.with_expected
        );
        Ok(summary)
    }
}
