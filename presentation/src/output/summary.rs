//! End-of-run summary for the console

use colored::Colorize;
use riddle_application::RunSummary;
use std::path::Path;

/// Formats a [`RunSummary`] for console display
pub struct SummaryFormatter;

impl SummaryFormatter {
    pub fn format(summary: &RunSummary, output: &Path, trace: &Path) -> String {
        let mut text = String::new();

        text.push_str(&Self::header("Run Summary"));
        text.push('\n');

        text.push_str(&format!(
            "{} {}\n",
            "Processed:".cyan().bold(),
            summary.processed
        ));

        match summary.accuracy() {
            Some(accuracy) => text.push_str(&format!(
                "{} {}/{} ({:.1}%)\n",
                "Exact match:".cyan().bold(),
                summary.correct,
                summary.with_expected,
                accuracy * 100.0
            )),
            None => text.push_str(&format!(
                "{} {}\n",
                "Exact match:".cyan().bold(),
                "no expected answers".dimmed()
            )),
        }

        if summary.error_markers > 0 {
            text.push_str(&format!(
                "{} {}\n",
                "Failed:".red().bold(),
                summary.error_markers
            ));
        }
        if summary.fallback_extractions > 0 {
            text.push_str(&format!(
                "{} {}\n",
                "Fallbacks:".yellow().bold(),
                summary.fallback_extractions
            ));
        }

        text.push('\n');
        text.push_str(&format!("{} {}\n", "Answers:".dimmed(), output.display()));
        text.push_str(&format!("{} {}\n", "Trace:".dimmed(), trace.display()));
        text.push_str(&Self::footer());

        text
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_labels() {
        let summary = RunSummary {
            processed: 4,
            with_expected: 3,
            correct: 2,
            error_markers: 1,
            fallback_extractions: 0,
        };
        let text = SummaryFormatter::format(
            &summary,
            Path::new("out/answers.jsonl"),
            Path::new("out/answers_process.json"),
        );
        assert!(text.contains("2/3 (66.7%)"));
        assert!(text.contains("Failed:"));
        assert!(!text.contains("Fallbacks:"));
        assert!(text.contains("out/answers.jsonl"));
        assert!(text.contains("out/answers_process.json"));
    }

    #[test]
    fn test_format_without_labels() {
        let summary = RunSummary {
            processed: 1,
            ..Default::default()
        };
        let text = SummaryFormatter::format(&summary, Path::new("a.jsonl"), Path::new("b.json"));
        assert!(text.contains("no expected answers"));
        assert!(!text.contains("Failed:"));
    }
}
