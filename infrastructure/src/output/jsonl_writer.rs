//! JSONL file writer for answer records.
//!
//! Each [`AnswerRecord`] is serialized as one compact JSON line and flushed
//! immediately, so an interrupted run keeps every answer written so far.

use riddle_application::ports::result_sink::{ResultSink, SinkError};
use riddle_domain::AnswerRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// JSONL answer writer: one `{"id", "output_field"}` object per line.
///
/// Flushes after every record and again on `Drop`.
pub struct JsonlResultWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl JsonlResultWriter {
    /// Create (or truncate) the output file at `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonlResultWriter {
    fn write_record(&mut self, record: &AnswerRecord) -> Result<(), SinkError> {
        let line =
            serde_json::to_string(record).map_err(|e| SinkError::Serialization(e.to_string()))?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlResultWriter {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!("Could not flush {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_one_compact_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.jsonl");
        let mut writer = JsonlResultWriter::create(&path).unwrap();

        writer
            .write_record(&AnswerRecord::new("q_0", "Ringo Sheena"))
            .unwrap();
        writer.write_record(&AnswerRecord::new("7", "椎名林檎")).unwrap();

        // Flushed per record: readable before the writer is dropped
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\"id\":\"q_0\",\"output_field\":\"Ringo Sheena\"}\n{\"id\":\"7\",\"output_field\":\"椎名林檎\"}\n"
        );
        assert_eq!(writer.path(), path.as_path());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/answers.jsonl");
        let mut writer = JsonlResultWriter::create(&path).unwrap();
        writer.write_record(&AnswerRecord::new("q_0", "ERROR")).unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(value["output_field"], "ERROR");
    }

    #[test]
    fn test_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.jsonl");
        std::fs::write(&path, "stale\n").unwrap();

        let writer = JsonlResultWriter::create(&path).unwrap();
        drop(writer);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
