//! Baidu AppBuilder web search adapter
//!
//! POSTs to the qianfan `ai_search/web_search` endpoint with the key in the
//! `X-Appbuilder-Authorization` header. The response's `references` array
//! is parsed leniently: missing fields become empty strings and entries
//! that are not objects are dropped.

use crate::config::FileSearchConfig;
use async_trait::async_trait;
use riddle_application::ports::search_provider::SearchProvider;
use riddle_domain::{Reference, SearchResponse};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

const BAIDU_SEARCH_URL: &str = "https://qianfan.baidubce.com/v2/ai_search/web_search";
const MAX_TOP_K: usize = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`BaiduSearchClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaiduSearchConfig {
    pub api_key: String,
    /// `standard` or `lite`
    pub edition: String,
    pub recency_filter: Option<String>,
    pub site_filter: Vec<String>,
    pub block_websites: Vec<String>,
    pub timeout: Duration,
}

impl BaiduSearchConfig {
    pub fn new(api_key: impl Into<String>, search: &FileSearchConfig) -> Self {
        Self {
            api_key: api_key.into(),
            edition: search.edition.clone(),
            recency_filter: search.recency_filter.clone(),
            site_filter: search.site_filter.clone(),
            block_websites: search.block_websites.clone(),
            timeout: Duration::from_secs(search.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

/// [`SearchProvider`] backed by Baidu AppBuilder.
pub struct BaiduSearchClient {
    config: BaiduSearchConfig,
    http: reqwest::Client,
}

impl BaiduSearchClient {
    pub fn new(config: BaiduSearchConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    fn request_body(&self, query: &str, top_k: usize) -> Value {
        let mut body = json!({
            "messages": [{"content": query, "role": "user"}],
            "edition": self.config.edition,
            "search_source": "baidu_search_v2",
            "resource_type_filter": [{"type": "web", "top_k": top_k.min(MAX_TOP_K)}],
        });
        if let Some(recency) = &self.config.recency_filter {
            body["search_recency_filter"] = json!(recency);
        }
        if !self.config.site_filter.is_empty() {
            body["search_filter"] = json!({"match": {"site": self.config.site_filter}});
        }
        if !self.config.block_websites.is_empty() {
            body["block_websites"] = json!(self.config.block_websites);
        }
        body
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<SearchResponse, String> {
        let response = self
            .http
            .post(BAIDU_SEARCH_URL)
            .header(
                "X-Appbuilder-Authorization",
                format!("Bearer {}", self.config.api_key),
            )
            .json(&self.request_body(query, top_k))
            .send()
            .await
            .map_err(|e| format!("Baidu search request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Baidu search returned HTTP {}: {}", status, body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Baidu search response: {}", e))?;
        parse_response(&body)
    }
}

#[async_trait]
impl SearchProvider for BaiduSearchClient {
    fn name(&self) -> &str {
        "baidu"
    }

    async fn web_search(&self, query: &str, top_k: usize) -> SearchResponse {
        debug!("Baidu search: {:?} (top_k={})", query, top_k.min(MAX_TOP_K));
        self.search(query, top_k).await.unwrap_or_else(|e| {
            warn!("{}", e);
            SearchResponse::failed(e)
        })
    }
}

/// A body with `references` is a result (possibly empty); a body with only
/// `code`/`message` is an API error.
fn parse_response(body: &Value) -> Result<SearchResponse, String> {
    if let Some(references) = body["references"].as_array() {
        return Ok(SearchResponse::new(
            references.iter().filter_map(parse_reference).collect(),
        ));
    }
    match body["message"].as_str() {
        Some(message) => Err(format!(
            "Baidu search error {}: {}",
            body["code"], message
        )),
        None => Ok(SearchResponse::default()),
    }
}

fn parse_reference(value: &Value) -> Option<Reference> {
    let object = value.as_object()?;
    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let mut reference = Reference::new(text("title"), text("content"), text("url"));
    let date = text("date");
    if !date.is_empty() {
        reference = reference.with_date(date);
    }
    Some(reference)
}

/// Render the first `max_results` references as numbered text blocks.
///
/// Each block is the title (with the date in parentheses when known), the
/// content with `\u{4}`/`\u{5}` control characters removed, and optionally
/// the source URL. Blocks are separated by a blank line.
pub fn format_search_results(
    response: &SearchResponse,
    max_results: usize,
    include_url: bool,
) -> String {
    if response.is_empty() {
        return "No relevant search results".to_string();
    }

    response
        .references
        .iter()
        .take(max_results)
        .enumerate()
        .map(|(i, reference)| {
            let title = if reference.title.is_empty() {
                "Untitled"
            } else {
                reference.title.as_str()
            };
            let mut block = format!("[Result {}] {}", i + 1, title);
            if let Some(date) = reference.date.as_deref().filter(|d| !d.is_empty()) {
                block.push_str(&format!(" ({})", date));
            }
            block.push('\n');
            block.push_str(&reference.content.replace(['\u{4}', '\u{5}'], ""));
            if include_url && !reference.url.is_empty() {
                block.push_str(&format!("\nSource: {}", reference.url));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
