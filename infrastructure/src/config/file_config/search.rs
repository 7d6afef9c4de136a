//! Search configuration from TOML (`[search]` section)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which web search backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProviderKind {
    /// Google Custom Search JSON API
    #[default]
    Google,
    /// Baidu AppBuilder web search
    Baidu,
}

impl SearchProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchProviderKind::Google => "google",
            SearchProviderKind::Baidu => "baidu",
        }
    }
}

impl std::fmt::Display for SearchProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SearchProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(SearchProviderKind::Google),
            "baidu" => Ok(SearchProviderKind::Baidu),
            other => Err(format!(
                "unknown search provider '{}' (expected google or baidu)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    pub provider: SearchProviderKind,
    /// Per-request timeout; provider default when unset (Google 15, Baidu 30)
    pub timeout_seconds: Option<u64>,
    /// Google `lr` restriction, e.g. `"en"` for `lang_en`
    pub language: Option<String>,
    /// Google SafeSearch level
    pub safe: String,
    /// Baidu search edition
    pub edition: String,
    /// Baidu recency filter (`week`, `month`, `semiyear`, `year`)
    pub recency_filter: Option<String>,
    /// Baidu: only search these sites
    pub site_filter: Vec<String>,
    /// Baidu: never return these sites
    pub block_websites: Vec<String>,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            provider: SearchProviderKind::Google,
            timeout_seconds: None,
            language: None,
            safe: "off".to_string(),
            edition: "standard".to_string(),
            recency_filter: None,
            site_filter: Vec::new(),
            block_websites: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("google".parse(), Ok(SearchProviderKind::Google));
        assert_eq!("Baidu".parse(), Ok(SearchProviderKind::Baidu));
        assert!("bing".parse::<SearchProviderKind>().is_err());
    }
}
