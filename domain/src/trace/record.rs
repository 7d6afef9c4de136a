//! Trace record entities

use crate::core::question::Question;
use crate::core::string::truncate_with_ellipsis;
use crate::decomposition::{DecompositionResult, Extracted};
use crate::search::SearchResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference content longer than this is truncated in the trace.
const TRACE_CONTENT_CHARS: usize = 200;

/// Summary of one aggregated reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSummary {
    /// 1-based position in the search response
    pub index: usize,
    pub title: String,
    pub content: String,
    pub url: String,
}

/// What the search stage returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTrace {
    pub result_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub references: Vec<ReferenceSummary>,
}

impl SearchTrace {
    /// Summarize the first `limit` references of a response.
    pub fn from_response(response: &SearchResponse, limit: usize) -> Self {
        let references = response
            .references
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, r)| ReferenceSummary {
                index: i + 1,
                title: r.title.clone(),
                content: truncate_with_ellipsis(&r.content, TRACE_CONTENT_CHARS),
                url: r.url.clone(),
            })
            .collect();

        Self {
            result_count: response.references.len(),
            error: response.error.clone(),
            references,
        }
    }
}

/// Intermediate values keyed by pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSteps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_question: Option<Extracted<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Extracted<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_queries: Option<Extracted<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchTrace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_raw_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_cleaned_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final answer against the gold label, when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerComparison {
    pub generated: String,
    pub expected: Option<String>,
    pub is_correct: bool,
}

/// Process log entry for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub id: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_answer: Option<String>,
    pub started_at: DateTime<Utc>,
    pub steps: TraceSteps,
    pub final_answer: String,
    pub comparison: AnswerComparison,
}

impl TraceRecord {
    /// Start a trace for `question`.
    pub fn begin(question: &Question) -> Self {
        Self {
            id: question.id().to_string(),
            question: question.text().to_string(),
            expected_answer: question.expected_answer().map(String::from),
            started_at: Utc::now(),
            steps: TraceSteps::default(),
            final_answer: String::new(),
            comparison: AnswerComparison {
                generated: String::new(),
                expected: question.expected_answer().map(String::from),
                is_correct: false,
            },
        }
    }

    /// Record the decomposition stage, including the derived search query.
    pub fn record_decomposition(&mut self, decomposition: &DecompositionResult) {
        self.steps.core_question = Some(decomposition.core_question.clone());
        self.steps.keywords = Some(decomposition.keywords.clone());
        self.steps.sub_queries = Some(decomposition.sub_queries.clone());
        self.steps.search_query = Some(decomposition.search_query());
    }

    /// Record the final answer and compare it to the gold label.
    pub fn finish(&mut self, final_answer: impl Into<String>) {
        let final_answer = final_answer.into();
        let is_correct = self.expected_answer.as_deref() == Some(final_answer.as_str());
        self.comparison = AnswerComparison {
            generated: final_answer.clone(),
            expected: self.expected_answer.clone(),
            is_correct,
        };
        self.final_answer = final_answer;
    }
}
