//! Web search adapters
//!
//! Both providers implement the [`SearchProvider`] port and never fail:
//! transport and API errors come back as an empty [`SearchResponse`] with
//! `error` set.
//!
//! [`SearchResponse`]: riddle_domain::SearchResponse

mod baidu;
mod google;

pub use baidu::{BaiduSearchClient, BaiduSearchConfig, format_search_results};
pub use google::{GoogleSearchClient, GoogleSearchConfig};

use crate::config::{ConfigError, Credentials, FileSearchConfig, SearchProviderKind};
use riddle_application::ports::search_provider::SearchProvider;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors raised while constructing a search provider
#[derive(Error, Debug)]
pub enum SearchSetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Build the configured search provider.
pub fn build_search_provider(
    search: &FileSearchConfig,
    credentials: &Credentials,
) -> Result<Arc<dyn SearchProvider>, SearchSetupError> {
    info!("Using {} search", search.provider);
    let provider: Arc<dyn SearchProvider> = match search.provider {
        SearchProviderKind::Google => {
            let config = GoogleSearchConfig::new(credentials.google()?, search)
                .with_proxy(credentials.proxy_url.clone());
            Arc::new(GoogleSearchClient::new(config)?)
        }
        SearchProviderKind::Baidu => {
            let config = BaiduSearchConfig::new(credentials.baidu_api_key()?, search);
            Arc::new(BaiduSearchClient::new(config)?)
        }
    };
    Ok(provider)
}
