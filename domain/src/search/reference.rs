//! Reference and search response value objects

use serde::{Deserialize, Serialize};

/// One retrieved document fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub title: String,
    pub content: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Reference {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: url.into(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Result of one search call.
///
/// Providers never fail: a transport or API failure is an empty reference
/// list with `error` set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub references: Vec<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn new(references: Vec<Reference>) -> Self {
        Self {
            references,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            references: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Title and content of the first `limit` references as a flat document
    /// list: title before content, empty strings skipped.
    pub fn documents(&self, limit: usize) -> Vec<String> {
        self.references
            .iter()
            .take(limit)
            .flat_map(|r| [&r.title, &r.content])
            .filter(|s| !s.is_empty())
            .cloned()
            .collect()
    }
}
