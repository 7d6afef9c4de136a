//! Process logging: the end-of-run trace log.
//!
//! Provides [`TraceLogWriter`], a pretty-printed JSON array writer that
//! implements the [`TraceSink`](riddle_application::TraceSink) port.

mod trace_log;

pub use trace_log::TraceLogWriter;
