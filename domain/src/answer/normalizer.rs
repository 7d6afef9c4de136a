//! Aggressive answer normalization.
//!
//! Language models rarely reply with a bare fact: they open with "Based on
//! the reference", quote the answer, or append an explanation after a comma.
//! [`clean_answer_aggressive`] strips all of that in a fixed order so the
//! result can be compared against a gold label by exact match.
//!
//! # Stages
//!
//! | # | Stage | Rule |
//! |---|-------|------|
//! | 1 | Prefix strip | first matching entry of [`BOILERPLATE_PREFIXES`] is removed |
//! | 2 | Colon split | a `:` within the first 15 characters cuts the label off |
//! | 3 | Quote strip | one leading and one trailing `"`/`'` removed |
//! | 4 | First clause | first delimiter of `, . \n ;` giving a clause longer than 2 chars |
//! | 5 | Trailing punctuation | trailing `. , ; ! ?` removed |
//! | 6 | Length cap | at most 30 characters |

use crate::core::string::{char_len, take_chars};

/// Boilerplate lead-ins removed from the start of an answer.
///
/// Order matters: the scan stops at the first entry the answer starts with,
/// so `"The answer is X"` loses only `"The"`.
pub const BOILERPLATE_PREFIXES: &[&str] = &[
    "According to the provided information",
    "According to the reference",
    "According to",
    "Based on the information",
    "Based on the reference",
    "Based on",
    "From the information",
    "From the reference",
    "The provided information",
    "The reference shows",
    "The information shows",
    "The search results show",
    "Here is",
    "Here are",
    "This is",
    "This",
    "That",
    "The",
    "The answer is",
    "Answer is",
    "Answer:",
    "It is:",
    "It is",
    "It:",
    "Is:",
    "Is",
    "Should be",
    "Could be",
    "Might be",
];

/// Clause delimiters, tried in this order regardless of where they occur.
pub const CLAUSE_DELIMITERS: &[char] = &[',', '.', '\n', ';'];

/// Maximum length of a cleaned answer, in characters.
pub const MAX_ANSWER_CHARS: usize = 30;

const TRAILING_PUNCTUATION: [char; 5] = ['.', ',', ';', '!', '?'];
const QUOTES: [char; 2] = ['"', '\''];
const COLON_WINDOW: usize = 15;
const MIN_CLAUSE_CHARS: usize = 2;
const FALLBACK_CHARS: usize = 20;

/// Normalize a raw model answer into a short canonical form.
///
/// Never fails. Returns an empty string only for empty input; if the
/// stages consume everything, the first 20 characters of the input are
/// returned instead.
///
/// # Examples
///
/// ```
/// use riddle_domain::answer::normalizer::clean_answer_aggressive;
///
/// assert_eq!(clean_answer_aggressive("Answer: Ringo Sheena."), "Ringo Sheena");
/// assert_eq!(clean_answer_aggressive(""), "");
/// ```
pub fn clean_answer_aggressive(answer: &str) -> String {
    if answer.is_empty() {
        return String::new();
    }

    let stripped = strip_boilerplate_prefix(answer);
    let unlabeled = split_leading_label(stripped);
    let unquoted = strip_wrapping_quotes(unlabeled);
    let clause = first_clause(unquoted);
    let bare = clause.trim_end_matches(TRAILING_PUNCTUATION);
    let capped = take_chars(bare, MAX_ANSWER_CHARS).trim();

    if capped.is_empty() {
        take_chars(answer, FALLBACK_CHARS).to_string()
    } else {
        capped.to_string()
    }
}

fn strip_boilerplate_prefix(answer: &str) -> &str {
    BOILERPLATE_PREFIXES
        .iter()
        .find_map(|prefix| answer.strip_prefix(prefix))
        .map(str::trim)
        .unwrap_or(answer)
}

fn split_leading_label(answer: &str) -> &str {
    match answer.chars().position(|c| c == ':') {
        Some(index) if index < COLON_WINDOW => answer
            .split_once(':')
            .map(|(_, rest)| rest.trim())
            .unwrap_or(answer),
        _ => answer,
    }
}

fn strip_wrapping_quotes(answer: &str) -> &str {
    let answer = answer.strip_prefix(QUOTES).unwrap_or(answer);
    answer.strip_suffix(QUOTES).unwrap_or(answer)
}

fn first_clause(answer: &str) -> &str {
    for delimiter in CLAUSE_DELIMITERS {
        if let Some((head, _)) = answer.split_once(*delimiter) {
            let head = head.trim();
            if char_len(head) > MIN_CLAUSE_CHARS {
                return head;
            }
        }
    }
    answer
}
