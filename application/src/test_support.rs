//! Scripted port implementations shared by the use case tests.

use crate::ports::generator::{Generator, GeneratorError};
use crate::ports::result_sink::{ResultSink, SinkError};
use crate::ports::search_provider::SearchProvider;
use async_trait::async_trait;
use riddle_domain::{AnswerRecord, Prompt, SearchResponse};
use std::collections::VecDeque;
use std::sync::Mutex;

enum Mode {
    Scripted,
    AlwaysFail,
    AlwaysEmpty,
}

/// Generator answering from a queue of scripted results.
pub struct ScriptedGenerator {
    mode: Mode,
    results: Mutex<VecDeque<Result<Vec<String>, GeneratorError>>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedGenerator {
    fn with_mode(mode: Mode, results: Vec<Result<Vec<String>, GeneratorError>>) -> Self {
        Self {
            mode,
            results: Mutex::new(VecDeque::from(results)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// One single-output reply per call, in order; errors once exhausted.
    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let results = replies.into_iter().map(|r| Ok(vec![r.into()])).collect();
        Self::with_mode(Mode::Scripted, results)
    }

    /// Arbitrary scripted results, in order.
    pub fn results(results: Vec<Result<Vec<String>, GeneratorError>>) -> Self {
        Self::with_mode(Mode::Scripted, results)
    }

    pub fn always_failing() -> Self {
        Self::with_mode(Mode::AlwaysFail, Vec::new())
    }

    pub fn empty_outputs() -> Self {
        Self::with_mode(Mode::AlwaysEmpty, Vec::new())
    }

    /// Every prompt received so far.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, prompts: &[Prompt]) -> Result<Vec<String>, GeneratorError> {
        self.prompts.lock().unwrap().extend_from_slice(prompts);
        match self.mode {
            Mode::AlwaysFail => Err(GeneratorError::ConnectionError("backend down".to_string())),
            Mode::AlwaysEmpty => Ok(Vec::new()),
            Mode::Scripted => self
                .results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GeneratorError::Other("No more responses".to_string()))),
        }
    }
}

/// Search provider returning the same response for every query.
pub struct FixedSearch {
    response: SearchResponse,
    queries: Mutex<Vec<(String, usize)>>,
}

impl FixedSearch {
    pub fn new(response: SearchResponse) -> Self {
        Self {
            response,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Every `(query, top_k)` received so far.
    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for FixedSearch {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn web_search(&self, query: &str, top_k: usize) -> SearchResponse {
        self.queries.lock().unwrap().push((query.to_string(), top_k));
        self.response.clone()
    }
}

/// Result sink keeping every record in memory.
#[derive(Debug, Default)]
pub struct MemoryResultSink {
    pub records: Vec<AnswerRecord>,
}

impl ResultSink for MemoryResultSink {
    fn write_record(&mut self, record: &AnswerRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}
