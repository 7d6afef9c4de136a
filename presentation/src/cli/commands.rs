//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for riddle-rag
#[derive(Parser, Debug)]
#[command(name = "riddle-rag")]
#[command(author, version, about = "Answer multi-hop riddle questions with web search and an LLM")]
#[command(long_about = r#"
riddle-rag answers a batch of riddle-style questions, one at a time.

For every question it:
1. Decomposes the riddle into a core question, keywords and sub-queries
2. Searches the web with the keywords
3. Keeps the sentences that overlap the question most
4. Asks the model for a bare-fact answer and normalizes it

Answers are streamed to a JSONL file; a detailed trace of every step is
written next to it when the run finishes.

Credentials are read from the environment:
  OPENAI_API_KEY, OPENAI_BASE_URL, TARGET_MODEL
  GOOGLE_API_KEY, GOOGLE_CSE_ID, PROXY_URL      (google search)
  BAIDU_APPBUILDER_API_KEY                      (baidu search)

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./riddle.toml       Project-level config
3. ~/.config/riddle-rag/config.toml   Global config

Example:
  riddle-rag --input questions.json --output answers.jsonl
  riddle-rag --provider baidu -v
  riddle-rag --dry-search "Tokyo Jihen members"
"#)]
pub struct Cli {
    /// JSON array of questions to answer
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// JSONL file receiving one answer per question
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Trace log path (default: output path with `_process.json`)
    #[arg(long, value_name = "PATH")]
    pub trace: Option<PathBuf>,

    /// Search provider (google or baidu)
    #[arg(short, long, value_name = "NAME")]
    pub provider: Option<String>,

    /// Run a single search, print the formatted results and exit
    #[arg(long, value_name = "QUERY")]
    pub dry_search: Option<String>,

    /// Plain line-based progress instead of a progress bar
    #[arg(long)]
    pub plain: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["riddle-rag"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.provider.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_paths_and_verbosity() {
        let cli = Cli::try_parse_from([
            "riddle-rag",
            "-i",
            "questions.json",
            "--output",
            "out/answers.jsonl",
            "--provider",
            "baidu",
            "-vv",
            "--log-file",
            "run.log",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("questions.json")));
        assert_eq!(cli.output, Some(PathBuf::from("out/answers.jsonl")));
        assert_eq!(cli.provider.as_deref(), Some("baidu"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn test_dry_search() {
        let cli = Cli::try_parse_from(["riddle-rag", "--dry-search", "Tokyo Jihen"]).unwrap();
        assert_eq!(cli.dry_search.as_deref(), Some("Tokyo Jihen"));
    }
}
