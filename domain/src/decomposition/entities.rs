//! Decomposition entities

use serde::{Deserialize, Serialize};

/// Which strategy produced an extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    /// Input was too short to be worth a model call; returned as-is.
    Passthrough,
    /// Parsed and validated model output.
    Llm,
    /// Deterministic heuristic over the original text.
    Fallback,
}

impl ExtractionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionSource::Passthrough => "passthrough",
            ExtractionSource::Llm => "llm",
            ExtractionSource::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extracted<T> {
    pub value: T,
    pub source: ExtractionSource,
}

impl<T> Extracted<T> {
    pub fn new(value: T, source: ExtractionSource) -> Self {
        Self { value, source }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ExtractionSource::Fallback
    }
}

/// Everything the decomposer derived from one question.
///
/// Produced fresh per question; never merged or cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionResult {
    pub core_question: Extracted<String>,
    pub keywords: Extracted<Vec<String>>,
    pub sub_queries: Extracted<Vec<String>>,
}

impl DecompositionResult {
    /// Query sent to the search provider: keywords joined by spaces, or the
    /// core question when there are no keywords.
    pub fn search_query(&self) -> String {
        if self.keywords.value.is_empty() {
            self.core_question.value.clone()
        } else {
            self.keywords.value.join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(keywords: Vec<&str>) -> DecompositionResult {
        DecompositionResult {
            core_question: Extracted::new("Who is the musician".to_string(), ExtractionSource::Llm),
            keywords: Extracted::new(
                keywords.into_iter().map(String::from).collect(),
                ExtractionSource::Llm,
            ),
            sub_queries: Extracted::new(vec![], ExtractionSource::Fallback),
        }
    }

    #[test]
    fn test_search_query_joins_keywords() {
        let r = result(vec!["Japanese", "musician", "26"]);
        assert_eq!(r.search_query(), "Japanese musician 26");
    }

    #[test]
    fn test_search_query_falls_back_to_core_question() {
        let r = result(vec![]);
        assert_eq!(r.search_query(), "Who is the musician");
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_string(&ExtractionSource::Fallback).unwrap();
        assert_eq!(json, "\"fallback\"");
        assert!(Extracted::new(1, ExtractionSource::Fallback).is_fallback());
    }
}
