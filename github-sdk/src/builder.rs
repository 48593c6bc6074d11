// ABOUTME: Builder pattern implementation for GitHubClient configuration
// ABOUTME: Provides type-safe configuration with compile-time validation

use crate::GitHubClient;
use crate::constants::{timeouts, urls};
use crate::error::GitHubError;
use secrecy::SecretString;
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<GitHubClient, GitHubError>))]
pub struct GitHubClientConfig {
    pub auth_token: SecretString,

    #[builder(default = false)]
    pub verbose: bool,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    /// GraphQL endpoint; defaults to github.com's
    #[builder(default = None)]
    pub base_url: Option<String>,

    #[builder(default = concat!("github-cli/", env!("CARGO_PKG_VERSION")).to_string())]
    pub user_agent: String,
}

impl GitHubClientConfig {
    /// Resolved GraphQL endpoint, validated as an absolute URL
    pub fn endpoint(&self) -> Result<String, GitHubError> {
        let raw = self
            .base_url
            .as_deref()
            .unwrap_or(urls::GITHUB_GRAPHQL_ENDPOINT);

        Url::parse(raw)
            .map(|url| url.to_string())
            .map_err(|e| GitHubError::Configuration(format!("Invalid API URL '{raw}': {e}")))
    }
}

impl From<GitHubClientConfig> for Result<GitHubClient, GitHubError> {
    fn from(config: GitHubClientConfig) -> Self {
        GitHubClient::from_config(config)
    }
}

impl GitHubClient {
    pub fn builder() -> GitHubClientConfigBuilder<((), (), (), (), ())> {
        GitHubClientConfig::builder()
    }
}
