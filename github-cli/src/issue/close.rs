// ABOUTME: Close workflow: pick or resolve an issue, close it, and forget it locally
// ABOUTME: Pull requests are closed through their own mutation; already-closed issues are left alone

use github_sdk::{IssueField, IssueKind, IssueTransport};

use crate::context::Session;
use crate::error::IssueCommandError;
use crate::prompt::Prompter;
use crate::recency::{RecencyStore, Selection, select_interactively};
use crate::resolver;

const CLOSE_FIELDS: &[IssueField] = &[
    IssueField::Id,
    IssueField::Number,
    IssueField::Title,
    IssueField::State,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed { number: u64, title: String },
    AlreadyClosed { number: u64, title: String },
    /// No selector given and nothing recent to pick from
    NoRecentIssues,
    /// The picker was dismissed
    Cancelled,
}

impl CloseOutcome {
    pub fn message(&self) -> Option<String> {
        match self {
            CloseOutcome::Closed { number, title } => {
                Some(format!("Closed issue #{number} ({title})"))
            }
            CloseOutcome::AlreadyClosed { number, title } => {
                Some(format!("Issue #{number} ({title}) is already closed"))
            }
            CloseOutcome::NoRecentIssues => Some("No recent issues to choose from".to_string()),
            CloseOutcome::Cancelled => None,
        }
    }
}

/// Without a selector the picker is the only way to choose an issue
pub fn ensure_selector_or_prompt(
    selector: Option<&str>,
    session: &Session,
) -> Result<(), IssueCommandError> {
    if selector.is_none() && !session.can_prompt {
        return Err(IssueCommandError::InteractiveRequired);
    }
    Ok(())
}

pub async fn close_issue(
    transport: &dyn IssueTransport,
    recency: &dyn RecencyStore,
    prompter: &dyn Prompter,
    session: &Session,
    selector: Option<&str>,
) -> Result<CloseOutcome, IssueCommandError> {
    ensure_selector_or_prompt(selector, session)?;

    let selector = match selector {
        Some(selector) => selector.to_string(),
        None => match select_interactively(recency, prompter, &session.repo, false)? {
            Selection::Chosen(selector) => selector,
            Selection::Empty => return Ok(CloseOutcome::NoRecentIssues),
            Selection::Cancelled => return Ok(CloseOutcome::Cancelled),
        },
    };

    let (issue, repo) =
        resolver::resolve(transport, &selector, &session.repo, CLOSE_FIELDS).await?;

    if issue.state.is_closed() {
        return Ok(CloseOutcome::AlreadyClosed {
            number: issue.number,
            title: issue.title,
        });
    }

    match issue.kind {
        IssueKind::PullRequest => transport.close_pull_request(&issue.id).await?,
        IssueKind::Issue => transport.close_issue(&issue.id).await?,
    }
    log::debug!("Closed {repo}#{}", issue.number);

    recency.delete_by_number(&repo, false, issue.number)?;

    Ok(CloseOutcome::Closed {
        number: issue.number,
        title: issue.title,
    })
}
