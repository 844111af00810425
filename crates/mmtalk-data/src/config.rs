//! Catalog endpoint configuration.

use serde::{Deserialize, Serialize};

/// Default GraphQL endpoint of the mmtalk catalog.
pub const DEFAULT_ENDPOINT: &str = "https://assignment.mobile.mmtalk.kr/graphql";

/// Environment variable the API token is read from.
pub const TOKEN_ENV_VAR: &str = "MMTALK_API_TOKEN";

/// Where and how to reach the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token. Never written back out.
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_token: None,
        }
    }
}

impl CatalogConfig {
    /// Fill a missing token from `MMTALK_API_TOKEN`.
    pub fn with_env_token(self) -> Self {
        self.with_token_from(|key| std::env::var(key).ok())
    }

    /// Fill a missing token from `lookup(TOKEN_ENV_VAR)`.
    pub fn with_token_from(mut self, lookup: impl FnOnce(&str) -> Option<String>) -> Self {
        if self.api_token.is_none() {
            self.api_token = lookup(TOKEN_ENV_VAR).filter(|token| !token.is_empty());
        }
        self
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }
}
