// ABOUTME: Typed failures of the issue workflows
// ABOUTME: Input and precondition errors plus wrappers for transport, recency, browser, and prompt failures

use github_sdk::GitHubError;
use thiserror::Error;

use crate::recency::RecencyError;

#[derive(Debug, Error)]
pub enum IssueCommandError {
    #[error("invalid issue format: {0:?}")]
    InvalidFormat(String),

    #[error("interactive mode required with no arguments")]
    InteractiveRequired,

    #[error("the '{0}' repository has disabled issues")]
    IssuesDisabled(String),

    #[error("must provide --title and --body when not running interactively")]
    NonInteractiveCreate,

    #[error(transparent)]
    Transport(#[from] GitHubError),

    #[error(transparent)]
    Recency(#[from] RecencyError),

    #[error("failed to open browser: {0}")]
    Browser(#[source] std::io::Error),

    #[error("could not collect title and/or body: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl IssueCommandError {
    /// Follow-up hint shown under the error, when one applies
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            IssueCommandError::InvalidFormat(_) => Some(
                "Pass an issue number such as 123, or a URL such as https://github.com/OWNER/REPO/issues/123",
            ),
            IssueCommandError::InteractiveRequired => Some("Pass an issue number or URL"),
            IssueCommandError::NonInteractiveCreate => {
                Some("Supply both flags, or run in a terminal to be prompted")
            }
            IssueCommandError::Transport(e) => e.help_text(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_quotes_selector() {
        let err = IssueCommandError::InvalidFormat("abc".to_string());
        assert_eq!(err.to_string(), r#"invalid issue format: "abc""#);

        let err = IssueCommandError::InvalidFormat("a\"b".to_string());
        assert_eq!(err.to_string(), r#"invalid issue format: "a\"b""#);
    }

    #[test]
    fn test_issues_disabled_names_repo() {
        let err = IssueCommandError::IssuesDisabled("acme/widgets".to_string());
        assert_eq!(
            err.to_string(),
            "the 'acme/widgets' repository has disabled issues"
        );
    }

    #[test]
    fn test_transport_error_passes_through() {
        let err: IssueCommandError = GitHubError::IssueNotFound {
            repo: "acme/widgets".to_string(),
            number: 7,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Could not resolve to an issue or pull request with the number of 7 in acme/widgets"
        );
    }
}
