//! Path configuration from TOML (`[paths]` section)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePathsConfig {
    /// JSON array of questions
    pub input: PathBuf,
    /// JSONL answer stream
    pub output: PathBuf,
    /// Trace log; derived from `output` when unset
    pub trace: Option<PathBuf>,
}

impl Default for FilePathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.json"),
            output: PathBuf::from("output.jsonl"),
            trace: None,
        }
    }
}

impl FilePathsConfig {
    /// The trace log path: explicit, or the output path with its `.jsonl`
    /// suffix replaced by `_process.json`.
    pub fn trace_path(&self) -> PathBuf {
        match &self.trace {
            Some(path) => path.clone(),
            None => default_trace_path(&self.output),
        }
    }
}

/// `answers.jsonl` becomes `answers_process.json`. Outputs without a
/// `.jsonl` suffix get `_process.json` appended.
pub fn default_trace_path(output: &Path) -> PathBuf {
    let output = output.to_string_lossy();
    let stem = output.strip_suffix(".jsonl").unwrap_or(&output);
    PathBuf::from(format!("{}_process.json", stem))
}
