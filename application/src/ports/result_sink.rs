//! Result persistence ports.
//!
//! Two sinks with different durability: the answer stream is written and
//! flushed one record at a time so partial progress survives an
//! interruption, while the trace log is written once at the end of a run.

use riddle_domain::{AnswerRecord, TraceRecord};
use thiserror::Error;

/// Errors raised while persisting results
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for the primary answer stream.
pub trait ResultSink: Send {
    /// Write one record and flush it before returning.
    fn write_record(&mut self, record: &AnswerRecord) -> Result<(), SinkError>;
}

/// Port for the end-of-run trace log.
pub trait TraceSink: Send + Sync {
    /// Persist every trace record of the run at once.
    fn write_all(&self, records: &[TraceRecord]) -> Result<(), SinkError>;
}
