//! Trace subdomain: the per-question process log.
//!
//! A [`TraceRecord`] captures every intermediate value of one pipeline run
//! for offline inspection. The pipeline never reads it back.

mod record;
mod stage;

pub use record::{AnswerComparison, ReferenceSummary, SearchTrace, TraceRecord, TraceSteps};
pub use stage::Stage;
