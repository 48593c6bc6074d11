// ABOUTME: GitHub SDK library providing a GraphQL client for issues and pull requests
// ABOUTME: Includes authentication, queries, mutations, and the transport traits used by the CLI

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::borrow::Cow;

pub mod builder;
pub mod constants;
pub mod error;
pub mod graphql;
pub mod queries;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_helpers;

pub use builder::GitHubClientConfig;
pub use error::GitHubError;
pub use graphql::{GraphQLErrorEntry, GraphQLRequest, GraphQLResponse};
pub use transport::{IssueListing, IssueQueries, IssueTransport};
pub use types::{
    Author, Comments, Issue, IssueConnection, IssueField, IssueFilters, IssueKind, IssueState,
    IssueStateFilter, IssueStatusPayload, Label, Labels, Repo, RepoMeta,
};

pub type Result<T> = std::result::Result<T, GitHubError>;

pub struct GitHubClient {
    client: reqwest::Client,
    endpoint: String,
    verbose: bool,
}

impl GitHubClient {
    pub(crate) fn from_config(config: GitHubClientConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;

        let mut headers = HeaderMap::new();
        let auth_value = format!("bearer {}", config.auth_token.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value).map_err(|_| GitHubError::Auth {
            reason: Cow::Borrowed("the token contains characters not allowed in a header"),
            source: None,
        })?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| GitHubError::Configuration(format!("Invalid user agent: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GitHubError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            verbose: config.verbose,
        })
    }

    /// GraphQL endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a GraphQL request and deserialize its `data` member
    pub async fn execute<T: DeserializeOwned>(&self, request: &GraphQLRequest) -> Result<T> {
        let operation = request.operation_name().unwrap_or("anonymous");
        if self.verbose {
            log::debug!("POST {} ({operation})", self.endpoint);
        }

        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if matches!(status.as_u16(), 403 | 429) {
            let remaining = header_str(&response, constants::headers::RATE_LIMIT_REMAINING);
            if remaining.as_deref() == Some("0") || status.as_u16() == 429 {
                return Err(GitHubError::RateLimit {
                    reset_at: header_str(&response, constants::headers::RATE_LIMIT_RESET),
                });
            }
        }

        if status.as_u16() == 401 {
            return Err(GitHubError::Auth {
                reason: Cow::Borrowed("the token was rejected"),
                source: None,
            });
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(GitHubError::Http {
                status: status.as_u16(),
                message: api_message(&body),
            });
        }
        log::debug!("{operation} returned {} bytes", body.len());

        let envelope: GraphQLResponse<T> = serde_json::from_str(&body)?;
        envelope.into_result()
    }
}

/// `message` of a JSON error body, else the body itself
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn header_str(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
