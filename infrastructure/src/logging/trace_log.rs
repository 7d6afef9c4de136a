//! JSON trace log writer.
//!
//! All [`TraceRecord`]s of a run are written at once as a single
//! pretty-printed JSON array.

use riddle_application::ports::result_sink::{SinkError, TraceSink};
use riddle_domain::TraceRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the trace log to a fixed path, replacing any previous content.
pub struct TraceLogWriter {
    path: PathBuf,
}

impl TraceLogWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the trace log.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TraceSink for TraceLogWriter {
    fn write_all(&self, records: &[TraceRecord]) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, records)
            .map_err(|e| SinkError::Serialization(e.to_string()))?;
        writer.flush()?;

        info!(
            "Wrote {} trace records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}
