//! Answer stream persistence.
//!
//! Provides [`JsonlResultWriter`], the JSONL writer behind the
//! [`ResultSink`](riddle_application::ResultSink) port.

mod jsonl_writer;

pub use jsonl_writer::JsonlResultWriter;
