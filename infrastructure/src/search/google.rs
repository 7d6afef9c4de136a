//! Google Custom Search JSON API adapter
//!
//! # Request
//!
//! | Param | Value |
//! |-------|-------|
//! | `key` / `cx` | API key and search engine id |
//! | `q` | query |
//! | `num` | `min(top_k, 10)`; the API caps one page at 10 |
//! | `safe` | SafeSearch level (default `off`) |
//! | `lr` | `lang_<language>` when a language is configured |
//! | `start` | 1-based offset, pagination only |
//!
//! A `top_k` above 10 is served by following `queries.nextPage` across
//! several requests.
//!
//! Each result item becomes a [`Reference`] whose content is the snippet,
//! extended with the page's `og:description` (or `description`) metatag
//! when the snippet does not already contain it.

use crate::config::{FileSearchConfig, GoogleCredentials};
use async_trait::async_trait;
use riddle_application::ports::search_provider::SearchProvider;
use riddle_domain::{Reference, SearchResponse};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

const GOOGLE_CSE_URL: &str = "https://www.googleapis.com/customsearch/v1";
const MAX_PAGE_SIZE: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Settings for [`GoogleSearchClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleSearchConfig {
    pub api_key: String,
    pub cse_id: String,
    /// HTTP(S) proxy for every request; blank means none
    pub proxy: Option<String>,
    pub language: Option<String>,
    pub safe: String,
    pub timeout: Duration,
}

impl GoogleSearchConfig {
    pub fn new(credentials: GoogleCredentials, search: &FileSearchConfig) -> Self {
        Self {
            api_key: credentials.api_key,
            cse_id: credentials.cse_id,
            proxy: None,
            language: search.language.clone(),
            safe: search.safe.clone(),
            timeout: Duration::from_secs(search.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.trim().is_empty());
        self
    }
}

/// [`SearchProvider`] backed by Google Custom Search.
pub struct GoogleSearchClient {
    config: GoogleSearchConfig,
    http: reqwest::Client,
}

impl GoogleSearchClient {
    pub fn new(config: GoogleSearchConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    fn query_params(&self, query: &str, num: usize, start: Option<usize>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("key", self.config.api_key.clone()),
            ("cx", self.config.cse_id.clone()),
            ("q", query.to_string()),
            ("num", num.to_string()),
            ("safe", self.config.safe.clone()),
        ];
        if let Some(language) = &self.config.language {
            params.push(("lr", format!("lang_{}", language)));
        }
        if let Some(start) = start {
            params.push(("start", start.to_string()));
        }
        params
    }

    async fn fetch_page(
        &self,
        query: &str,
        num: usize,
        start: Option<usize>,
    ) -> Result<Value, String> {
        let response = self
            .http
            .get(GOOGLE_CSE_URL)
            .query(&self.query_params(query, num, start))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    format!("Google API timeout ({}s)", self.config.timeout.as_secs())
                } else {
                    format!("Google API request error: {}", e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Google API returned HTTP {}: {}", status, body));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Google API response: {}", e))
    }

    /// Collect up to `total` references across result pages, following
    /// `queries.nextPage`. Stops early on the first failed page; references
    /// gathered before the failure are kept.
    pub async fn search_with_pagination(&self, query: &str, total: usize) -> SearchResponse {
        paginate(total, move |num, start| self.fetch_page(query, num, Some(start))).await
    }
}

/// Page loop behind [`GoogleSearchClient::search_with_pagination`].
/// `fetch_page(num, start)` returns one raw result page.
async fn paginate<F, Fut>(total: usize, mut fetch_page: F) -> SearchResponse
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Value, String>>,
{
    let mut references: Vec<Reference> = Vec::new();
    let mut start = 1;

    while references.len() < total {
        let num = (total - references.len()).min(MAX_PAGE_SIZE);
        let page = match fetch_page(num, start).await {
            Ok(page) => page,
            Err(e) => {
                warn!("{}", e);
                return SearchResponse {
                    references,
                    error: Some(e),
                };
            }
        };

        let items = parse_items(&page);
        if items.is_empty() {
            break;
        }
        references.extend(items);

        if !has_next_page(&page) {
            break;
        }
        start += num;
    }

    references.truncate(total);
    SearchResponse::new(references)
}

#[async_trait]
impl SearchProvider for GoogleSearchClient {
    fn name(&self) -> &str {
        "google"
    }

    async fn web_search(&self, query: &str, top_k: usize) -> SearchResponse {
        if top_k > MAX_PAGE_SIZE {
            debug!("Google search: {:?} (paginated, total={})", query, top_k);
            return self.search_with_pagination(query, top_k).await;
        }
        let num = top_k;
        debug!("Google search: {:?} (num={})", query, num);
        match self.fetch_page(query, num, None).await {
            Ok(page) => SearchResponse::new(parse_items(&page)),
            Err(e) => {
                warn!("{}", e);
                SearchResponse::failed(e)
            }
        }
    }
}

/// Convert the `items` array of a result page into references.
fn parse_items(page: &Value) -> Vec<Reference> {
    let Some(items) = page["items"].as_array() else {
        return Vec::new();
    };
    items.iter().map(parse_item).collect()
}

fn parse_item(item: &Value) -> Reference {
    let mut content = item["snippet"].as_str().unwrap_or_default().to_string();
    if let Some(description) = meta_description(item)
        && !content.contains(description)
    {
        if !content.is_empty() {
            content.push(' ');
        }
        content.push_str(description);
    }

    Reference::new(
        item["title"].as_str().unwrap_or_default(),
        content,
        item["link"].as_str().unwrap_or_default(),
    )
}

/// First metatag block's `og:description`, else its `description`.
fn meta_description(item: &Value) -> Option<&str> {
    let metatags = &item["pagemap"]["metatags"][0];
    ["og:description", "description"]
        .iter()
        .filter_map(|key| metatags[*key].as_str())
        .find(|value| !value.is_empty())
}

fn has_next_page(page: &Value) -> bool {
    page["queries"]["nextPage"]
        .as_array()
        .is_some_and(|pages| !pages.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(language: Option<&str>) -> GoogleSearchClient {
        let config = GoogleSearchConfig::new(
            GoogleCredentials {
                api_key: "key".to_string(),
                cse_id: "cse".to_string(),
            },
            &FileSearchConfig {
                language: language.map(String::from),
                ..Default::default()
            },
        );
        GoogleSearchClient::new(config).unwrap()
    }

    #[test]
    fn test_query_params() {
        let params = client(Some("en")).query_params("tokyo jihen", 10, None);
        assert_eq!(
            params,
            vec![
                ("key", "key".to_string()),
                ("cx", "cse".to_string()),
                ("q", "tokyo jihen".to_string()),
                ("num", "10".to_string()),
                ("safe", "off".to_string()),
                ("lr", "lang_en".to_string()),
            ]
        );

        let params = client(None).query_params("q", 3, Some(11));
        assert_eq!(params.last(), Some(&("start", "11".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "lr"));
    }

    #[test]
    fn test_parse_items_appends_meta_description() {
        let page = json!({
            "items": [
                {
                    "title": "Tokyo Jihen - Wikipedia",
                    "link": "https://en.wikipedia.org/wiki/Tokyo_Jihen",
                    "snippet": "Tokyo Jihen is a Japanese rock band.",
                    "pagemap": {"metatags": [{
                        "og:description": "Formed by Ringo Sheena in 2003.",
                        "description": "ignored"
                    }]}
                },
                {
                    "title": "Duplicate description",
                    "link": "https://example.com",
                    "snippet": "Ringo Sheena joined at 26.",
                    "pagemap": {"metatags": [{"description": "Ringo Sheena joined at 26."}]}
                },
                {"title": "No snippet", "link": "https://b.example.com"}
            ]
        });

        let references = parse_items(&page);
        assert_eq!(references.len(), 3);
        assert_eq!(
            references[0].content,
            "Tokyo Jihen is a Japanese rock band. Formed by Ringo Sheena in 2003."
        );
        assert_eq!(references[0].url, "https://en.wikipedia.org/wiki/Tokyo_Jihen");
        assert_eq!(references[1].content, "Ringo Sheena joined at 26.");
        assert_eq!(references[2].content, "");
        assert_eq!(references[2].title, "No snippet");
    }

    #[test]
    fn test_parse_items_falls_back_to_description() {
        let page = json!({"items": [{
            "title": "t",
            "link": "l",
            "snippet": "",
            "pagemap": {"metatags": [{"og:description": "", "description": "Plain description"}]}
        }]});
        assert_eq!(parse_items(&page)[0].content, "Plain description");
    }

    #[test]
    fn test_page_without_items() {
        let page = json!({"searchInformation": {"totalResults": "0"}});
        assert!(parse_items(&page).is_empty());
        assert!(!has_next_page(&page));
    }

    #[test]
    fn test_has_next_page() {
        let page = json!({"queries": {"nextPage": [{"startIndex": 11}]}});
        assert!(has_next_page(&page));
    }

    fn page(titles: std::ops::Range<usize>, next: bool) -> Value {
        let items: Vec<Value> = titles
            .map(|i| json!({"title": format!("r{}", i), "link": format!("https://r{}", i), "snippet": "s"}))
            .collect();
        let mut page = json!({"items": items});
        if next {
            page["queries"] = json!({"nextPage": [{"startIndex": 0}]});
        }
        page
    }

    #[tokio::test]
    async fn test_paginate_follows_next_page() {
        let mut pages = vec![page(0..10, true), page(10..20, true)].into_iter();
        let mut requests = Vec::new();

        let response = paginate(15, |num, start| {
            requests.push((num, start));
            let next = pages.next();
            async move { next.ok_or_else(|| "no more pages".to_string()) }
        })
        .await;

        assert_eq!(requests, vec![(10, 1), (5, 11)]);
        assert_eq!(response.error, None);
        assert_eq!(response.references.len(), 15);
        assert_eq!(response.references[14].title, "r14");
    }

    #[tokio::test]
    async fn test_paginate_stops_without_next_page() {
        let mut pages = vec![page(0..4, false)].into_iter();
        let mut calls = 0;

        let response = paginate(25, |_, _| {
            calls += 1;
            let next = pages.next();
            async move { next.ok_or_else(|| "no more pages".to_string()) }
        })
        .await;

        assert_eq!(calls, 1);
        assert_eq!(response.references.len(), 4);
        assert_eq!(response.error, None);
    }

    #[tokio::test]
    async fn test_paginate_keeps_references_before_failure() {
        let mut pages = vec![Ok(page(0..10, true)), Err("Google API returned HTTP 429".to_string())]
            .into_iter();

        let response = paginate(20, |_, _| {
            let next = pages.next();
            async move { next.unwrap_or_else(|| Err("no more pages".to_string())) }
        })
        .await;

        assert_eq!(response.references.len(), 10);
        assert_eq!(response.error.as_deref(), Some("Google API returned HTTP 429"));
    }

    #[test]
    fn test_blank_proxy_is_ignored() {
        let config = GoogleSearchConfig::new(
            GoogleCredentials {
                api_key: "key".to_string(),
                cse_id: "cse".to_string(),
            },
            &FileSearchConfig::default(),
        )
        .with_proxy(Some("  ".to_string()));
        assert_eq!(config.proxy, None);
        assert_eq!(config.timeout, Duration::from_secs(15));
    }
}
