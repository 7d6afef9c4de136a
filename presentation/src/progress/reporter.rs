//! Progress reporting for a riddle-rag run

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use riddle_application::ports::progress::PipelineProgress;
use riddle_domain::{AnswerRecord, Question, Stage};
use std::sync::Mutex;

/// Reports progress with a single bar over the question batch
///
/// The bar message shows the current question id and pipeline stage.
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    current_id: Mutex<String>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            current_id: Mutex::new(String::new()),
        }
    }

    fn batch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn stage_display_name(stage: Stage) -> &'static str {
        match stage {
            Stage::Decompose => "decomposing",
            Stage::Search => "searching",
            Stage::Extract => "extracting context",
            Stage::Generate => "generating answer",
            Stage::Retry => "retrying answer",
            Stage::Persist => "saving",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgress for ProgressReporter {
    fn on_run_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::batch_style());
        pb.set_prefix("Answering");
        pb.set_message("Starting...");
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_question_start(&self, _index: usize, _total: usize, question: &Question) {
        *self.current_id.lock().unwrap() = question.id().to_string();
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_message(question.id().to_string());
        }
    }

    fn on_stage(&self, stage: Stage) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            let id = self.current_id.lock().unwrap();
            pb.set_message(format!("{} {}", id, Self::stage_display_name(stage).dimmed()));
        }
    }

    fn on_question_complete(&self, _index: usize, record: &AnswerRecord) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            let status = if record.is_error_marker() {
                format!("{} {}", "x".red(), record.id)
            } else {
                format!("{} {}", "v".green(), record.id)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_run_complete(&self) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{}", "done!".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PipelineProgress for SimpleProgress {
    fn on_run_start(&self, total: usize) {
        println!("{} {} ({} questions)", "->".cyan(), "Answering".bold(), total);
    }

    fn on_question_start(&self, index: usize, total: usize, question: &Question) {
        println!(
            "{} [{}/{}] {}",
            "->".cyan(),
            index + 1,
            total,
            question.id().bold()
        );
    }

    fn on_stage(&self, stage: Stage) {
        if stage == Stage::Retry {
            println!("  {} low-quality answer, retrying", "!".yellow());
        }
    }

    fn on_question_complete(&self, _index: usize, record: &AnswerRecord) {
        if record.is_error_marker() {
            println!("  {} {}", "x".red(), record.output_field);
        } else {
            println!("  {} {}", "v".green(), record.output_field);
        }
    }

    fn on_run_complete(&self) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_questions() {
        let reporter = ProgressReporter::new();
        let question = Question::new("q_0", "Who?");

        reporter.on_run_start(2);
        reporter.on_question_start(0, 2, &question);
        reporter.on_stage(Stage::Search);
        reporter.on_question_complete(0, &AnswerRecord::new("q_0", "Ringo Sheena"));

        let position = reporter.bar.lock().unwrap().as_ref().map(|pb| pb.position());
        assert_eq!(position, Some(1));

        reporter.on_run_complete();
        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_reporter_ignores_events_before_start() {
        let reporter = ProgressReporter::default();
        reporter.on_stage(Stage::Generate);
        reporter.on_question_complete(0, &AnswerRecord::new("q_0", "ERROR"));
        reporter.on_run_complete();
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
