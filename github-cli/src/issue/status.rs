// ABOUTME: Status workflow: open issues assigned to, mentioning, and opened by the viewer
// ABOUTME: Fetching and rendering are separate so the sections can be tested without a network

use chrono::{DateTime, Utc};
use github_sdk::constants::limits::STATUS_PER_SECTION;
use github_sdk::{IssueQueries, IssueStatusPayload, Repo};

use crate::error::IssueCommandError;
use crate::output::status_section;

pub async fn fetch_status(
    queries: &dyn IssueQueries,
    repo: &Repo,
) -> Result<IssueStatusPayload, IssueCommandError> {
    let login = queries.viewer_login().await?;
    log::debug!("Fetching issue status for {login} in {repo}");
    Ok(queries
        .issue_status(repo, &login, STATUS_PER_SECTION)
        .await?)
}

pub fn render_status(payload: &IssueStatusPayload, now: DateTime<Utc>, use_color: bool) -> String {
    let sections = [
        (
            "Issues assigned to you",
            "There are no issues assigned to you",
            &payload.assigned,
        ),
        (
            "Issues mentioning you",
            "There are no issues mentioning you",
            &payload.mentioned,
        ),
        (
            "Issues opened by you",
            "There are no issues opened by you",
            &payload.authored,
        ),
    ];

    sections
        .iter()
        .map(|(header, empty, connection)| {
            status_section(header, empty, connection, now, use_color)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
