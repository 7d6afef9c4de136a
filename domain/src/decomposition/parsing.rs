//! Output parsing and deterministic fallbacks for question decomposition.
//!
//! Each `parse_*` function turns a raw model completion into a value. Only
//! the core question can be rejected; keyword and sub-query lists may come
//! back empty. The matching `fallback_*` function derives a value from the
//! original question text alone and is used when the model call fails.
//!
//! | Routine | Passthrough below | Parse | Fallback |
//! |---------|-------------------|-------|----------|
//! | core question | 20 chars | label strip, `?`/`.` trim, >= 3 chars | last sentence |
//! | keywords | 10 chars | label strip, split on `[,\s]+`, <= 10 tokens | regex words + numbers |
//! | sub-queries | 10 chars | `，` -> `,`, split on `,` | the question itself |

use crate::core::string::{char_len, take_chars};
use regex::Regex;
use std::sync::LazyLock;

/// Questions shorter than this are used as their own core question.
pub const CORE_QUESTION_MIN_INPUT_CHARS: usize = 20;
/// Questions shorter than this are used as their only keyword.
pub const KEYWORDS_MIN_INPUT_CHARS: usize = 10;
/// Questions shorter than this are used as their only sub-query.
pub const SUB_QUERIES_MIN_INPUT_CHARS: usize = 10;

/// Labels a model may put in front of an extracted core question.
pub const CORE_QUESTION_LABELS: &[&str] = &["Output:", "Answer:", "Question:", "Core question:"];
/// Labels a model may put in front of a keyword list.
pub const KEYWORD_LABELS: &[&str] = &["Output:", "Keywords:", "Entities:"];

pub const MAX_KEYWORDS: usize = 10;
const MIN_CORE_QUESTION_CHARS: usize = 3;
const FALLBACK_WORDS: usize = 6;
const FALLBACK_NUMBERS: usize = 3;
const FALLBACK_TEXT_CHARS: usize = 30;

static KEYWORD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("valid keyword separator pattern"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.?!]").expect("valid sentence end pattern"));

static FALLBACK_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]{2,15}\b").expect("valid word pattern"));

static FALLBACK_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid number pattern"));

/// Strip each label in turn if the text starts with it, trimming after
/// every removal.
pub fn strip_labels<'a>(text: &'a str, labels: &[&str]) -> &'a str {
    labels.iter().fold(text, |current, label| {
        current
            .strip_prefix(label)
            .map(str::trim)
            .unwrap_or(current)
    })
}

// ==================== Core question ====================

/// Validate a core-question completion.
pub fn parse_core_question(raw: &str) -> Option<String> {
    let labeled = strip_labels(raw.trim(), CORE_QUESTION_LABELS);
    let core = labeled.trim_end_matches(['?', '.']).trim();
    if char_len(core) < MIN_CORE_QUESTION_CHARS {
        return None;
    }
    Some(core.to_string())
}

/// Last non-empty sentence of the question (split on `.`, `?`, `!`).
pub fn fallback_core_question(text: &str) -> String {
    SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .last()
        .unwrap_or(text)
        .to_string()
}

// ==================== Keywords ====================

/// Tokenize a keyword completion. May return an empty list, in which case
/// the search falls back to the core question.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    let labeled = strip_labels(raw.trim(), KEYWORD_LABELS);
    KEYWORD_SEPARATOR
        .split(labeled)
        .map(str::trim)
        .filter(|token| char_len(token) > 1)
        .take(MAX_KEYWORDS)
        .map(String::from)
        .collect()
}

/// Up to six alphabetic words followed by up to three numbers, in order of
/// appearance. Never empty: falls back to the first 30 characters.
pub fn fallback_keywords(text: &str) -> Vec<String> {
    let words = FALLBACK_WORD
        .find_iter(text)
        .take(FALLBACK_WORDS)
        .map(|m| m.as_str().to_string());
    let numbers = FALLBACK_NUMBER
        .find_iter(text)
        .take(FALLBACK_NUMBERS)
        .map(|m| m.as_str().to_string());

    let keywords: Vec<String> = words.chain(numbers).take(MAX_KEYWORDS).collect();
    if keywords.is_empty() {
        vec![take_chars(text, FALLBACK_TEXT_CHARS).to_string()]
    } else {
        keywords
    }
}

// ==================== Sub-queries ====================

/// Split a sub-query completion. Full-width commas count as separators.
pub fn parse_sub_queries(raw: &str) -> Vec<String> {
    raw.trim()
        .replace('，', ",")
        .split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(String::from)
        .collect()
}

/// The question itself as the only sub-query.
pub fn fallback_sub_queries(text: &str) -> Vec<String> {
    vec![text.to_string()]
}
