// ABOUTME: Custom error types for the GitHub SDK with user-friendly messages
// ABOUTME: Maps HTTP statuses and GraphQL error entries onto specific failure modes

use std::borrow::Cow;
use thiserror::Error;

use crate::graphql::GraphQLErrorEntry;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Authentication failed: {reason}")]
    Auth {
        reason: Cow<'static, str>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Could not resolve to an issue or pull request with the number of {number} in {repo}")]
    IssueNotFound { repo: String, number: u64 },

    #[error("{message}")]
    NotFound { message: String, path: Vec<String> },

    #[error("Network error: {message}")]
    Network {
        message: String,
        retryable: bool,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("GraphQL error: {message}")]
    GraphQL {
        message: String,
        errors: Vec<GraphQLErrorEntry>,
    },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("API rate limit exceeded")]
    RateLimit { reset_at: Option<String> },

    #[error("Invalid API response: {message}")]
    InvalidResponse { message: String },

    #[error("Timeout: Request took too long to complete")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GitHubError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            GitHubError::Auth { .. } => Some(
                "Set GH_TOKEN or GITHUB_TOKEN to a token with the `repo` scope.\nCreate one at: https://github.com/settings/tokens",
            ),
            GitHubError::IssueNotFound { .. } => {
                Some("Issues can be referenced by number (e.g. 123) or by URL")
            }
            GitHubError::Network { .. } => Some("Check your internet connection and try again"),
            GitHubError::Http { status: 403, .. } => Some(
                "The token lacks access to this resource. Organizations with SAML SSO require authorizing the token for them",
            ),
            GitHubError::RateLimit { .. } => Some("Wait a moment before making another request"),
            GitHubError::Timeout => Some("Try again or check your network connection"),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            GitHubError::Network { retryable, .. } => *retryable,
            GitHubError::Http { status, .. } => *status >= 500,
            GitHubError::Timeout | GitHubError::RateLimit { .. } => true,
            _ => false,
        }
    }

    /// Builds the error for a failed GraphQL response.
    ///
    /// A response whose errors are all `NOT_FOUND` becomes [`GitHubError::NotFound`],
    /// everything else is reported as a GraphQL error with every message joined.
    pub fn from_graphql_errors(errors: Vec<GraphQLErrorEntry>) -> Self {
        if !errors.is_empty()
            && errors
                .iter()
                .all(|e| e.error_type.as_deref() == Some("NOT_FOUND"))
        {
            let first = &errors[0];
            return GitHubError::NotFound {
                message: first.message.clone(),
                path: first.path_segments(),
            };
        }

        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        GitHubError::GraphQL { message, errors }
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return GitHubError::Timeout;
        }

        match err.status().map(|s| s.as_u16()) {
            Some(401) => GitHubError::Auth {
                reason: Cow::Borrowed("the token was rejected"),
                source: Some(Box::new(err)),
            },
            Some(429) => GitHubError::RateLimit { reset_at: None },
            Some(status) => GitHubError::Network {
                message: err.to_string(),
                retryable: status >= 500,
                source: Box::new(err),
            },
            None => GitHubError::Network {
                message: err.to_string(),
                retryable: err.is_connect(),
                source: Box::new(err),
            },
        }
    }
}

impl From<serde_json::Error> for GitHubError {
    fn from(err: serde_json::Error) -> Self {
        GitHubError::InvalidResponse {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str, error_type: Option<&str>) -> GraphQLErrorEntry {
        GraphQLErrorEntry {
            message: message.to_string(),
            error_type: error_type.map(str::to_string),
            path: None,
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GitHubError::IssueNotFound {
                repo: "acme/widgets".to_string(),
                number: 42
            }
            .to_string(),
            "Could not resolve to an issue or pull request with the number of 42 in acme/widgets"
        );
        assert_eq!(
            GitHubError::Configuration("bad url".to_string()).to_string(),
            "Configuration error: bad url"
        );
        assert_eq!(
            GitHubError::Timeout.to_string(),
            "Timeout: Request took too long to complete"
        );
    }

    #[test]
    fn test_help_text() {
        let auth = GitHubError::Auth {
            reason: Cow::Borrowed("missing token"),
            source: None,
        };
        assert!(auth.help_text().unwrap().contains("GH_TOKEN"));
        assert_eq!(
            GitHubError::Configuration("x".to_string()).help_text(),
            None
        );
    }

    #[test]
    fn test_retryable() {
        assert!(GitHubError::Timeout.is_retryable());
        assert!(GitHubError::RateLimit { reset_at: None }.is_retryable());
        assert!(
            !GitHubError::IssueNotFound {
                repo: "a/b".to_string(),
                number: 1
            }
            .is_retryable()
        );
        assert!(
            !GitHubError::GraphQL {
                message: "x".to_string(),
                errors: vec![]
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_not_found_errors_are_classified() {
        let err = GitHubError::from_graphql_errors(vec![entry(
            "Could not resolve to a Repository with the name 'acme/nope'.",
            Some("NOT_FOUND"),
        )]);
        assert!(matches!(err, GitHubError::NotFound { .. }));
    }

    #[test]
    fn test_mixed_errors_are_graphql_errors() {
        let err = GitHubError::from_graphql_errors(vec![
            entry("first", Some("NOT_FOUND")),
            entry("second", None),
        ]);
        match err {
            GitHubError::GraphQL { message, errors } => {
                assert_eq!(message, "first; second");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("Expected GraphQL error, got {other:?}"),
        }
    }
}
