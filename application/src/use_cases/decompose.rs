//! Question decomposition use case.
//!
//! Three independent extraction routines share one failure-handling shape:
//! ask the model, validate its output, and fall back to a deterministic
//! heuristic when the call errors or the output is rejected. Each routine
//! is an [`ExtractionStrategy`]; [`run_extraction`] is the single place
//! where the model-or-fallback decision is made, so no error ever leaves
//! the decomposer.

use crate::config::pipeline_params::pause;
use crate::ports::generator::Generator;
use riddle_domain::core::string::char_len;
use riddle_domain::decomposition::parsing::{
    CORE_QUESTION_MIN_INPUT_CHARS, KEYWORDS_MIN_INPUT_CHARS, SUB_QUERIES_MIN_INPUT_CHARS,
    fallback_core_question, fallback_keywords, fallback_sub_queries, parse_core_question,
    parse_keywords, parse_sub_queries,
};
use riddle_domain::{DecompositionResult, Extracted, ExtractionSource, Prompt, PromptTemplate};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One LLM-assisted extraction with a deterministic fallback.
pub trait ExtractionStrategy: Send + Sync {
    type Output: Send;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Inputs shorter than this (in characters) skip the model entirely.
    fn min_input_chars(&self) -> usize;

    /// Value used for inputs below [`min_input_chars`](Self::min_input_chars).
    fn passthrough(&self, text: &str) -> Self::Output;

    /// Prompt sent to the model.
    fn prompt(&self, text: &str) -> Prompt;

    /// Validate a completion; `None` rejects it.
    fn parse(&self, raw: &str) -> Option<Self::Output>;

    /// Heuristic over the original text. Must always produce a usable value.
    fn fallback(&self, text: &str) -> Self::Output;
}

/// Run `strategy` on `text`, recovering every failure locally.
pub async fn run_extraction<G, E>(generator: &G, strategy: &E, text: &str) -> Extracted<E::Output>
where
    G: Generator + ?Sized,
    E: ExtractionStrategy,
{
    if char_len(text) < strategy.min_input_chars() {
        debug!("{}: input too short, passing through", strategy.name());
        return Extracted::new(strategy.passthrough(text), ExtractionSource::Passthrough);
    }

    match generator.generate_one(strategy.prompt(text)).await {
        Ok(Some(raw)) => match strategy.parse(&raw) {
            Some(value) => {
                debug!("{}: accepted model output {:?}", strategy.name(), raw);
                Extracted::new(value, ExtractionSource::Llm)
            }
            None => {
                warn!("{}: rejected model output {:?}, using fallback", strategy.name(), raw);
                Extracted::new(strategy.fallback(text), ExtractionSource::Fallback)
            }
        },
        Ok(None) => {
            warn!("{}: model returned no output, using fallback", strategy.name());
            Extracted::new(strategy.fallback(text), ExtractionSource::Fallback)
        }
        Err(e) => {
            warn!("{}: generation failed ({}), using fallback", strategy.name(), e);
            Extracted::new(strategy.fallback(text), ExtractionSource::Fallback)
        }
    }
}

/// Minimal interrogative form of the question.
pub struct CoreQuestionStrategy;

impl ExtractionStrategy for CoreQuestionStrategy {
    type Output = String;

    fn name(&self) -> &'static str {
        "core_question"
    }

    fn min_input_chars(&self) -> usize {
        CORE_QUESTION_MIN_INPUT_CHARS
    }

    fn passthrough(&self, text: &str) -> String {
        text.to_string()
    }

    fn prompt(&self, text: &str) -> Prompt {
        PromptTemplate::core_question(text)
    }

    fn parse(&self, raw: &str) -> Option<String> {
        parse_core_question(raw)
    }

    fn fallback(&self, text: &str) -> String {
        fallback_core_question(text)
    }
}

/// Search keywords preserving entities, numbers and qualifiers.
pub struct KeywordStrategy;

impl ExtractionStrategy for KeywordStrategy {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "keywords"
    }

    fn min_input_chars(&self) -> usize {
        KEYWORDS_MIN_INPUT_CHARS
    }

    fn passthrough(&self, text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    fn prompt(&self, text: &str) -> Prompt {
        PromptTemplate::keywords(text)
    }

    fn parse(&self, raw: &str) -> Option<Vec<String>> {
        Some(parse_keywords(raw))
    }

    fn fallback(&self, text: &str) -> Vec<String> {
        fallback_keywords(text)
    }
}

/// Declarative single-entity search phrases.
pub struct SubQueryStrategy;

impl ExtractionStrategy for SubQueryStrategy {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "sub_queries"
    }

    fn min_input_chars(&self) -> usize {
        SUB_QUERIES_MIN_INPUT_CHARS
    }

    fn passthrough(&self, text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    fn prompt(&self, text: &str) -> Prompt {
        PromptTemplate::sub_queries(text)
    }

    fn parse(&self, raw: &str) -> Option<Vec<String>> {
        Some(parse_sub_queries(raw))
    }

    fn fallback(&self, text: &str) -> Vec<String> {
        fallback_sub_queries(text)
    }
}

/// Decomposes a question into core question, keywords and sub-queries.
pub struct QuestionDecomposer<G: Generator + ?Sized> {
    generator: Arc<G>,
    call_delay: Duration,
}

impl<G: Generator + ?Sized> QuestionDecomposer<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self {
            generator,
            call_delay: Duration::ZERO,
        }
    }

    /// Pause for `delay` after every model call made by [`decompose`](Self::decompose).
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = delay;
        self
    }

    pub async fn extract_core_question(&self, text: &str) -> Extracted<String> {
        run_extraction(self.generator.as_ref(), &CoreQuestionStrategy, text).await
    }

    pub async fn extract_keywords(&self, text: &str) -> Extracted<Vec<String>> {
        run_extraction(self.generator.as_ref(), &KeywordStrategy, text).await
    }

    pub async fn decompose_into_sub_queries(&self, text: &str) -> Extracted<Vec<String>> {
        run_extraction(self.generator.as_ref(), &SubQueryStrategy, text).await
    }

    /// Run all three routines in order, pausing after each model call.
    pub async fn decompose(&self, text: &str) -> DecompositionResult {
        let core_question = self.extract_core_question(text).await;
        self.pace(core_question.source).await;
        info!("Core question: {}", core_question.value);

        let keywords = self.extract_keywords(text).await;
        self.pace(keywords.source).await;
        info!("Keywords: {:?}", keywords.value);

        let sub_queries = self.decompose_into_sub_queries(text).await;
        self.pace(sub_queries.source).await;
        debug!("Sub-queries: {:?}", sub_queries.value);

        DecompositionResult {
            core_question,
            keywords,
            sub_queries,
        }
    }

    async fn pace(&self, source: ExtractionSource) {
        if source != ExtractionSource::Passthrough {
            pause(self.call_delay).await;
        }
    }
}
