//! Question file loader
//!
//! The input is a JSON array of objects:
//!
//! | Field | Required | Meaning |
//! |-------|:---:|---------|
//! | `input_field` | Yes | riddle text (string) |
//! | `id` | No | string, or any JSON value rendered as its JSON text; `q_<index>` when absent or null |
//! | `output_field` | No | gold answer (string) |
//!
//! Entries that are not objects, or whose `input_field` is missing or not a
//! string, are skipped. Blank text is kept and answered like any other
//! question. `<index>` is the entry's position in the array, counting
//! skipped entries.

use riddle_domain::Question;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that prevent a run from starting
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed input JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Input must be a JSON array of questions")]
    NotAnArray,
}

/// Read and parse the question file at `path`.
pub fn load_questions(path: &Path) -> Result<Vec<Question>, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let questions = parse_questions(&content)?;
    info!("Loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Parse questions from JSON text.
pub fn parse_questions(content: &str) -> Result<Vec<Question>, InputError> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(InputError::NotAnArray);
    };

    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| parse_item(index, item))
        .collect())
}

fn parse_item(index: usize, item: &Value) -> Option<Question> {
    let Some(object) = item.as_object() else {
        debug!("Skipping entry {}: not an object", index);
        return None;
    };
    let Some(text) = object.get("input_field").and_then(Value::as_str) else {
        debug!("Skipping entry {}: no string input_field", index);
        return None;
    };

    let id = match object.get("id") {
        None | Some(Value::Null) => format!("q_{}", index),
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
    };

    let question = Question::new(id, text);

    Some(match object.get("output_field").and_then(Value::as_str) {
        Some(expected) => question.with_expected_answer(expected),
        None => question,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_questions() {
        let content = r#"[
            {"id": "a1", "input_field": "Who is the musician?", "output_field": "Ringo Sheena"},
            {"input_field": "Which city?"},
            {"id": 42, "input_field": "What year?"}
        ]"#;
        let questions = parse_questions(content).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].id(), "a1");
        assert_eq!(questions[0].expected_answer(), Some("Ringo Sheena"));
        assert_eq!(questions[1].id(), "q_1");
        assert_eq!(questions[1].expected_answer(), None);
        assert_eq!(questions[2].id(), "42");
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let content = r#"[
            "just a string",
            {"id": "no-input"},
            {"id": "numeric-input", "input_field": 7},
            {"id": "null-input", "input_field": null},
            {"input_field": "Kept", "output_field": 3}
        ]"#;
        let questions = parse_questions(content).unwrap();
        assert_eq!(questions.len(), 1);
        // Index counts skipped entries
        assert_eq!(questions[0].id(), "q_4");
        assert_eq!(questions[0].expected_answer(), None);
    }

    #[test]
    fn test_blank_input_is_kept() {
        let content = r#"[
            {"id": "a", "input_field": ""},
            {"id": "b", "input_field": "Who?"},
            {"input_field": "   "}
        ]"#;
        let questions = parse_questions(content).unwrap();
        let ids: Vec<&str> = questions.iter().map(|q| q.id()).collect();
        assert_eq!(ids, vec!["a", "b", "q_2"]);
        assert_eq!(questions[0].text(), "");
        assert_eq!(questions[2].text(), "   ");
    }

    #[test]
    fn test_top_level_must_be_array() {
        assert!(matches!(
            parse_questions(r#"{"input_field": "x"}"#),
            Err(InputError::NotAnArray)
        ));
        assert!(matches!(
            parse_questions("[{"),
            Err(InputError::Malformed(_))
        ));
    }

    #[test]
    fn test_load_questions_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, r#"[{"input_field": "Who?"}]"#).unwrap();

        let questions = load_questions(&path).unwrap();
        assert_eq!(questions[0].id(), "q_0");
        assert_eq!(questions[0].text(), "Who?");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_questions(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, InputError::NotFound(_)));
    }
}
