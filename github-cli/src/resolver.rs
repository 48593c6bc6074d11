// ABOUTME: Resolves user-supplied issue selectors (numbers or web URLs) to issue records
// ABOUTME: URL selectors carry their own owner/repo, which replaces the ambient repository

use github_sdk::{Issue, IssueField, IssueTransport, Repo};
use url::Url;

use crate::error::IssueCommandError;

/// Parse a selector into the repository and number to fetch.
///
/// Digit-only input is a number in `repo`. Anything else must be an https
/// issue or pull request URL on `repo`'s host.
pub fn parse_selector(selector: &str, repo: &Repo) -> Result<(Repo, u64), IssueCommandError> {
    if let Some(number) = parse_number(selector) {
        return Ok((repo.clone(), number));
    }

    parse_url(selector, repo).ok_or_else(|| IssueCommandError::InvalidFormat(selector.to_string()))
}

fn parse_number(input: &str) -> Option<u64> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

fn parse_url(selector: &str, repo: &Repo) -> Option<(Repo, u64)> {
    let url = Url::parse(selector).ok()?;
    if url.scheme() != "https" || !url.host_str()?.eq_ignore_ascii_case(&repo.host) {
        return None;
    }

    let mut segments = url.path_segments()?;
    let owner = segments.next().filter(|s| !s.is_empty())?;
    let name = segments.next().filter(|s| !s.is_empty())?;
    if !matches!(segments.next()?, "issues" | "pull") {
        return None;
    }
    let number = parse_number(segments.next()?)?;

    Some((Repo::with_host(repo.host.clone(), owner, name), number))
}

/// Fetch the issue a selector points at, with the repository it lives in
pub async fn resolve(
    transport: &dyn IssueTransport,
    selector: &str,
    repo: &Repo,
    fields: &[IssueField],
) -> Result<(Issue, Repo), IssueCommandError> {
    let (target, number) = parse_selector(selector, repo)?;
    log::debug!("Resolving {selector:?} to {target}#{number}");

    let issue = transport.fetch_issue(&target, number, fields).await?;
    Ok((issue, target))
}
