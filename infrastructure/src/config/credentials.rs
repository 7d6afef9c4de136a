//! API credentials from the process environment
//!
//! Secrets never live in the TOML file. They are read once at startup and
//! handed to the adapter constructors.

use super::ConfigError;
use super::file_config::SearchProviderKind;
use figment::{Figment, providers::Env};
use serde::Deserialize;

/// Environment variables read into [`Credentials`].
pub const CREDENTIAL_VARS: &[&str] = &[
    "OPENAI_API_KEY",
    "GOOGLE_API_KEY",
    "GOOGLE_CSE_ID",
    "PROXY_URL",
    "BAIDU_APPBUILDER_API_KEY",
];

/// Secrets and endpoints taken from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub google_cse_id: Option<String>,
    pub proxy_url: Option<String>,
    pub baidu_appbuilder_api_key: Option<String>,
}

/// Google Custom Search credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleCredentials {
    pub api_key: String,
    pub cse_id: String,
}

impl Credentials {
    /// Read the credential variables from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Figment::from(
            Env::raw()
                .only(CREDENTIAL_VARS)
                .map(|key| key.as_str().to_ascii_lowercase().into()),
        )
        .extract()
        .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// API key for the answer generator.
    pub fn openai_api_key(&self) -> Result<&str, ConfigError> {
        require(&self.openai_api_key, "OPENAI_API_KEY")
    }

    pub fn google(&self) -> Result<GoogleCredentials, ConfigError> {
        Ok(GoogleCredentials {
            api_key: require(&self.google_api_key, "GOOGLE_API_KEY")?.to_string(),
            cse_id: require(&self.google_cse_id, "GOOGLE_CSE_ID")?.to_string(),
        })
    }

    pub fn baidu_api_key(&self) -> Result<&str, ConfigError> {
        require(&self.baidu_appbuilder_api_key, "BAIDU_APPBUILDER_API_KEY")
    }

    /// Check that everything the selected search provider and the
    /// generator need is present.
    pub fn check(&self, provider: SearchProviderKind) -> Result<(), ConfigError> {
        self.openai_api_key()?;
        match provider {
            SearchProviderKind::Google => self.google().map(|_| ()),
            SearchProviderKind::Baidu => self.baidu_api_key().map(|_| ()),
        }
    }
}

fn require<'a>(value: &'a Option<String>, var: &'static str) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingCredential(var))
}
