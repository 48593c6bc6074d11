// ABOUTME: List workflow: translate flags into filters and fetch matching issues
// ABOUTME: Distinguishes "nothing open" from "nothing matches" for the empty-state message

use github_sdk::{Issue, IssueFilters, IssueQueries, IssueStateFilter, Repo};

use crate::constants::limits::DEFAULT_LIST_LIMIT;
use crate::error::IssueCommandError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub assignee: Option<String>,
    pub labels: Vec<String>,
    /// `None` when no --state flag was given
    pub state: Option<IssueStateFilter>,
    pub limit: Option<usize>,
}

impl ListOptions {
    /// Any filter flag was given, `--limit` included
    pub fn has_filters(&self) -> bool {
        self.assignee.is_some()
            || !self.labels.is_empty()
            || self.state.is_some()
            || self.limit.is_some()
    }

    pub fn filters(&self) -> IssueFilters {
        IssueFilters {
            state: self.state.unwrap_or_default(),
            labels: self.labels.clone(),
            assignee: self.assignee.clone(),
            limit: self.limit.unwrap_or(DEFAULT_LIST_LIMIT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    Issues(Vec<Issue>),
    NoneOpen,
    NoMatches,
}

impl ListOutcome {
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            ListOutcome::Issues(_) => None,
            ListOutcome::NoneOpen => Some("There are no open issues"),
            ListOutcome::NoMatches => Some("No issues match your search"),
        }
    }
}

pub async fn list_issues(
    queries: &dyn IssueQueries,
    repo: &Repo,
    opts: &ListOptions,
) -> Result<ListOutcome, IssueCommandError> {
    let listing = queries.list_issues(repo, &opts.filters()).await?;
    if !listing.has_issues_enabled {
        return Err(IssueCommandError::IssuesDisabled(repo.full_name()));
    }

    let issues = listing.connection.issues;
    log::debug!(
        "Fetched {} of {} issues",
        issues.len(),
        listing.connection.total_count
    );

    Ok(match (issues.is_empty(), opts.has_filters()) {
        (false, _) => ListOutcome::Issues(issues),
        (true, true) => ListOutcome::NoMatches,
        (true, false) => ListOutcome::NoneOpen,
    })
}
