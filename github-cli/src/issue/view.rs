// ABOUTME: View workflow: resolve an issue and open it in the browser or return it for preview
// ABOUTME: Every successful view is remembered so close can offer it later

use github_sdk::{Issue, IssueField, IssueTransport};

use crate::browser::Browser;
use crate::context::Session;
use crate::error::IssueCommandError;
use crate::recency::RecencyStore;
use crate::resolver;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
    OpenedInBrowser { url: String },
    Preview(Box<Issue>),
}

pub async fn view_issue(
    transport: &dyn IssueTransport,
    recency: &dyn RecencyStore,
    browser: &dyn Browser,
    session: &Session,
    selector: &str,
    preview: bool,
) -> Result<ViewOutcome, IssueCommandError> {
    let (issue, repo) =
        resolver::resolve(transport, selector, &session.repo, IssueField::ALL).await?;

    if let Err(e) = recency.record_visit(&repo, issue.is_pull_request(), issue.number, &issue.title)
    {
        log::warn!("Could not remember issue #{}: {e}", issue.number);
    }

    if preview {
        return Ok(ViewOutcome::Preview(Box::new(issue)));
    }

    let url = issue
        .url
        .clone()
        .unwrap_or_else(|| format!("{}/issues/{}", repo.web_url(), issue.number));
    browser.open(&url)?;
    Ok(ViewOutcome::OpenedInBrowser { url })
}
