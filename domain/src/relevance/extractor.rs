//! Keyword-overlap sentence extraction.
//!
//! Instead of handing whole search snippets to the model, the pipeline keeps
//! only the one or two sentences that share the most Latin-alphabet words
//! with the question.
//!
//! # Known limitation
//!
//! Sentence boundaries are the Han-script terminators `。！？` plus line
//! breaks, while scoring only sees Latin tokens. English snippets therefore
//! usually arrive as one long "sentence", and Chinese sentences never score
//! above zero. Both halves are kept as they are; changing either one changes
//! which context the model sees.

use crate::core::string::{char_len, take_chars};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[。！？\n]+").expect("valid sentence boundary pattern"));

static LATIN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]{2,}\b").expect("valid latin word pattern"));

/// Fragments this short (in characters) are never treated as sentences.
const MIN_SENTENCE_CHARS: usize = 10;
/// Only this many collected sentences are scored.
const MAX_SCORED_SENTENCES: usize = 50;
/// Prefix of the first document returned when nothing splits into sentences.
const RAW_FALLBACK_CHARS: usize = 200;
/// Sentences returned when no sentence overlaps the question.
const UNSCORED_FALLBACK_SENTENCES: usize = 2;

/// A sentence with its keyword-overlap score. Only lives during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSentence<'a> {
    pub score: usize,
    pub text: &'a str,
}

/// Select up to `max_sentences` sentences from `documents` that best
/// overlap `question`, joined by newlines.
///
/// # Examples
///
/// ```
/// use riddle_domain::relevance::extract_relevant_sentences;
///
/// let docs = vec!["Paris is the capital of France. It is known for the Eiffel Tower.".to_string()];
/// let context = extract_relevant_sentences(&docs, "What is the capital of France?", 2);
/// assert_eq!(context, docs[0]);
/// assert_eq!(extract_relevant_sentences(&[], "anything", 2), "");
/// ```
pub fn extract_relevant_sentences(
    documents: &[String],
    question: &str,
    max_sentences: usize,
) -> String {
    let Some(first_document) = documents.first() else {
        return String::new();
    };

    let sentences = split_sentences(documents);
    if sentences.is_empty() {
        return take_chars(first_document, RAW_FALLBACK_CHARS).to_string();
    }

    let keywords = latin_words(question);
    let ranked = rank_sentences(&sentences, &keywords);

    let selected: Vec<&str> = ranked
        .iter()
        .take(max_sentences)
        .filter(|sentence| sentence.score > 0)
        .map(|sentence| sentence.text)
        .collect();

    if selected.is_empty() {
        return sentences
            .iter()
            .take(UNSCORED_FALLBACK_SENTENCES)
            .copied()
            .collect::<Vec<_>>()
            .join("\n");
    }

    selected.join("\n")
}

/// Split every document on Han terminators and newlines, keeping fragments
/// longer than [`MIN_SENTENCE_CHARS`] in document order.
fn split_sentences(documents: &[String]) -> Vec<&str> {
    documents
        .iter()
        .flat_map(|document| SENTENCE_BOUNDARY.split(document))
        .map(str::trim)
        .filter(|fragment| char_len(fragment) > MIN_SENTENCE_CHARS)
        .collect()
}

/// Lowercased, deduplicated Latin words of two or more letters.
fn latin_words(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    LATIN_WORD
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Score the first [`MAX_SCORED_SENTENCES`] sentences and stable-sort them
/// by score, highest first.
fn rank_sentences<'a>(sentences: &[&'a str], keywords: &HashSet<String>) -> Vec<RankedSentence<'a>> {
    let mut ranked: Vec<RankedSentence<'a>> = sentences
        .iter()
        .take(MAX_SCORED_SENTENCES)
        .map(|text| RankedSentence {
            score: latin_words(text).intersection(keywords).count(),
            text,
        })
        .collect();

    // sort_by is stable: equal scores keep collection order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
