//! Answer Question use case
//!
//! The per-question pipeline:
//!
//! ```text
//! Decompose -> Search -> Aggregate -> Extract -> Generate -> Validate -> (Retry?) -> Persist
//! ```
//!
//! Persisting is left to [`RunBatchUseCase`](super::run_batch::RunBatchUseCase);
//! this use case returns the output record and the full trace. Nothing here
//! returns an error: search failures become an empty document list and
//! generation failures become a marker string in the output.

use super::decompose::QuestionDecomposer;
use crate::config::PipelineParams;
use crate::config::pipeline_params::pause;
use crate::ports::generator::{Generator, GeneratorError};
use crate::ports::progress::PipelineProgress;
use crate::ports::search_provider::SearchProvider;
use riddle_domain::{
    Answer, AnswerRecord, ERROR_MARKER, GENERATION_FAILED_MARKER, PromptTemplate, Question,
    SearchTrace, Stage, TraceRecord, extract_relevant_sentences,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of answering one question.
#[derive(Debug, Clone)]
pub struct QuestionOutcome {
    /// Line for the primary output stream
    pub record: AnswerRecord,
    /// Full process log entry
    pub trace: TraceRecord,
}

/// Use case for answering a single question end to end
pub struct AnswerQuestionUseCase<G: Generator + ?Sized, S: SearchProvider + ?Sized> {
    generator: Arc<G>,
    search: Arc<S>,
    decomposer: QuestionDecomposer<G>,
    params: PipelineParams,
}

impl<G: Generator + ?Sized, S: SearchProvider + ?Sized> AnswerQuestionUseCase<G, S> {
    pub fn new(generator: Arc<G>, search: Arc<S>, params: PipelineParams) -> Self {
        let decomposer =
            QuestionDecomposer::new(Arc::clone(&generator)).with_call_delay(params.call_delay);
        Self {
            generator,
            search,
            decomposer,
            params,
        }
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Answer `question`, reporting stages to `progress`.
    pub async fn execute(
        &self,
        question: &Question,
        progress: &dyn PipelineProgress,
    ) -> QuestionOutcome {
        let mut trace = TraceRecord::begin(question);

        // Decompose
        progress.on_stage(Stage::Decompose);
        let decomposition = self.decomposer.decompose(question.text()).await;
        trace.record_decomposition(&decomposition);
        let core_question = decomposition.core_question.value.clone();
        let query = decomposition.search_query();
        info!("Search query: {}", query);

        // Search
        progress.on_stage(Stage::Search);
        let response = self.search.web_search(&query, self.params.top_k).await;
        match &response.error {
            Some(e) => warn!("Search via {} failed: {}", self.search.name(), e),
            None => info!("Found {} references", response.references.len()),
        }
        trace.steps.search = Some(SearchTrace::from_response(
            &response,
            self.params.max_references,
        ));
        pause(self.params.search_delay).await;

        // Aggregate + Extract
        progress.on_stage(Stage::Extract);
        let documents = response.documents(self.params.max_references);
        let context =
            extract_relevant_sentences(&documents, question.text(), self.params.max_sentences);
        debug!("Relevant context: {:?}", context);
        trace.steps.relevant_context = Some(context.clone());

        // Generate + Validate (+ Retry)
        progress.on_stage(Stage::Generate);
        let final_answer = match self
            .generate_answer(&context, &core_question, &mut trace, progress)
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Answer generation failed for {}: {}", question.id(), e);
                trace.steps.error = Some(e.to_string());
                ERROR_MARKER.to_string()
            }
        };

        info!("Final answer for {}: {}", question.id(), final_answer);
        trace.finish(final_answer.clone());

        QuestionOutcome {
            record: AnswerRecord::new(question.id(), final_answer),
            trace,
        }
    }

    /// Generate, clean, and run the quality gate with at most one retry.
    async fn generate_answer(
        &self,
        context: &str,
        core_question: &str,
        trace: &mut TraceRecord,
        progress: &dyn PipelineProgress,
    ) -> Result<String, GeneratorError> {
        let prompt = PromptTemplate::answer(context, core_question);
        let Some(raw) = self.generator.generate_one(prompt).await? else {
            warn!("Generator returned no answer");
            trace.steps.error = Some("generator returned no output".to_string());
            return Ok(GENERATION_FAILED_MARKER.to_string());
        };

        let answer = Answer::from_raw(raw.trim());
        trace.steps.raw_answer = Some(answer.raw.clone());
        trace.steps.cleaned_answer = Some(answer.cleaned.clone());

        if !answer.needs_retry() {
            return Ok(answer.cleaned);
        }

        info!("Answer {:?} failed the quality gate, retrying", answer.cleaned);
        progress.on_stage(Stage::Retry);
        let retry_prompt = PromptTemplate::answer_retry(context, core_question);
        match self.generator.generate_one(retry_prompt).await? {
            Some(raw) => {
                let retry = Answer::from_raw(raw);
                trace.steps.retry_raw_answer = Some(retry.raw);
                trace.steps.retry_cleaned_answer = Some(retry.cleaned.clone());
                Ok(retry.cleaned)
            }
            None => Ok(answer.cleaned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::test_support::{FixedSearch, ScriptedGenerator};
    use riddle_domain::{ExtractionSource, Reference, SearchResponse};

    const QUESTION: &str = "A Japanese musician who joined a famous Japanese band at age 26. \
         The band's name contains a well-known Japanese city. Who is the musician?";

    fn question() -> Question {
        Question::new("q_0", QUESTION)
            .with_expected_answer("Ringo Sheena")
    }

    fn tokyo_jihen_results() -> SearchResponse {
        SearchResponse::new(vec![
            Reference::new(
                "Tokyo Jihen - Wikipedia",
                "Tokyo Jihen is a Japanese band.\nRingo Sheena is the Japanese musician who formed the band",
                "https://en.wikipedia.org/wiki/Tokyo_Jihen",
            ),
            Reference::new("", "Unrelated snippet without overlap", "https://example.com"),
        ])
    }

    fn decomposition_replies() -> Vec<&'static str> {
        vec![
            "Who is the musician",
            "Japanese musician 26 famous band city",
            "Japanese musician joined band at 26, band named after Japanese city",
        ]
    }

    fn use_case(
        generator: Arc<ScriptedGenerator>,
        search: Arc<FixedSearch>,
    ) -> AnswerQuestionUseCase<ScriptedGenerator, FixedSearch> {
        AnswerQuestionUseCase::new(generator, search, PipelineParams::default().without_delays())
    }

    #[tokio::test]
    async fn test_happy_path() {
        let mut replies = decomposition_replies();
        replies.push("Answer: Ringo Sheena.");
        let generator = Arc::new(ScriptedGenerator::replies(replies));
        let search = Arc::new(FixedSearch::new(tokyo_jihen_results()));
        let outcome = use_case(generator.clone(), search.clone())
            .execute(&question(), &NoProgress)
            .await;

        assert_eq!(outcome.record, AnswerRecord::new("q_0", "Ringo Sheena"));
        assert!(outcome.trace.comparison.is_correct);
        assert_eq!(
            search.queries(),
            vec![("Japanese musician 26 famous band city".to_string(), 10)]
        );

        let steps = &outcome.trace.steps;
        assert_eq!(steps.raw_answer.as_deref(), Some("Answer: Ringo Sheena."));
        assert_eq!(steps.cleaned_answer.as_deref(), Some("Ringo Sheena"));
        assert!(steps.retry_raw_answer.is_none());
        assert_eq!(steps.search.as_ref().unwrap().result_count, 2);

        // The answer prompt carries the extracted context and the core question
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 4);
        let answer_prompt = &prompts[3];
        assert_eq!(answer_prompt.user, "Who is the musician");
        let context = steps.relevant_context.as_deref().unwrap();
        assert!(context.starts_with("Ringo Sheena is the Japanese musician"));
        assert!(answer_prompt.system.as_deref().unwrap().contains(context));
    }

    #[tokio::test]
    async fn test_zero_references_still_answers() {
        let mut replies = decomposition_replies();
        replies.push("Unknown Artist");
        let generator = Arc::new(ScriptedGenerator::replies(replies));
        let search = Arc::new(FixedSearch::new(SearchResponse::failed("quota exceeded")));
        let outcome = use_case(generator, search)
            .execute(&question(), &NoProgress)
            .await;

        assert_eq!(outcome.record.output_field, "Unknown Artist");
        let steps = &outcome.trace.steps;
        assert_eq!(steps.relevant_context.as_deref(), Some(""));
        let search_trace = steps.search.as_ref().unwrap();
        assert_eq!(search_trace.result_count, 0);
        assert_eq!(search_trace.error.as_deref(), Some("quota exceeded"));
    }

    #[tokio::test]
    async fn test_quality_gate_retries_once() {
        let mut replies = decomposition_replies();
        replies.push("no information");
        replies.push("Ringo Sheena");
        let generator = Arc::new(ScriptedGenerator::replies(replies));
        let search = Arc::new(FixedSearch::new(tokyo_jihen_results()));
        let outcome = use_case(generator.clone(), search)
            .execute(&question(), &NoProgress)
            .await;

        assert_eq!(outcome.record.output_field, "Ringo Sheena");
        let steps = &outcome.trace.steps;
        assert_eq!(steps.cleaned_answer.as_deref(), Some("no information"));
        assert_eq!(steps.retry_cleaned_answer.as_deref(), Some("Ringo Sheena"));

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 5);
        assert_eq!(prompts[4].system, None);
        assert!(prompts[4].user.ends_with("Question: Who is the musician\nAnswer:"));
    }

    #[tokio::test]
    async fn test_retry_adopted_even_if_still_bad() {
        let mut replies = decomposition_replies();
        replies.push("X");
        replies.push("according to sources");
        let generator = Arc::new(ScriptedGenerator::replies(replies));
        let search = Arc::new(FixedSearch::new(tokyo_jihen_results()));
        let outcome = use_case(generator.clone(), search)
            .execute(&question(), &NoProgress)
            .await;

        assert_eq!(outcome.record.output_field, "according to sources");
        // No second retry
        assert_eq!(generator.prompts().len(), 5);
    }

    #[tokio::test]
    async fn test_generation_error_becomes_marker() {
        let mut results: Vec<Result<Vec<String>, GeneratorError>> = decomposition_replies()
            .into_iter()
            .map(|r| Ok(vec![r.to_string()]))
            .collect();
        results.push(Err(GeneratorError::Timeout));
        let generator = Arc::new(ScriptedGenerator::results(results));
        let search = Arc::new(FixedSearch::new(tokyo_jihen_results()));
        let outcome = use_case(generator, search)
            .execute(&question(), &NoProgress)
            .await;

        assert_eq!(outcome.record.output_field, ERROR_MARKER);
        assert_eq!(outcome.trace.steps.error.as_deref(), Some("Timeout"));
        assert!(!outcome.trace.comparison.is_correct);
    }

    #[tokio::test]
    async fn test_empty_generation_becomes_marker() {
        let mut results: Vec<Result<Vec<String>, GeneratorError>> = decomposition_replies()
            .into_iter()
            .map(|r| Ok(vec![r.to_string()]))
            .collect();
        results.push(Ok(vec![]));
        let generator = Arc::new(ScriptedGenerator::results(results));
        let search = Arc::new(FixedSearch::new(tokyo_jihen_results()));
        let outcome = use_case(generator, search)
            .execute(&question(), &NoProgress)
            .await;

        assert_eq!(outcome.record.output_field, GENERATION_FAILED_MARKER);
    }

    #[tokio::test]
    async fn test_backend_down_everywhere() {
        let generator = Arc::new(ScriptedGenerator::always_failing());
        let search = Arc::new(FixedSearch::new(SearchResponse::default()));
        let outcome = use_case(generator, search.clone())
            .execute(&question(), &NoProgress)
            .await;

        assert_eq!(outcome.record.output_field, ERROR_MARKER);
        let steps = &outcome.trace.steps;
        assert_eq!(steps.keywords.as_ref().unwrap().source, ExtractionSource::Fallback);
        // Fallback keywords still drive the search
        assert_eq!(
            search.queries()[0].0,
            "Japanese musician who joined famous Japanese 26"
        );
    }
}
