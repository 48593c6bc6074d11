// ABOUTME: Create workflow: repository checks, draft collection, and the submit/preview/cancel branches
// ABOUTME: Also builds the new-issue web URLs used by --web and by the preview action

use github_sdk::{IssueTransport, Repo};
use std::path::PathBuf;
use url::form_urlencoded::byte_serialize;

use crate::browser::Browser;
use crate::context::Session;
use crate::draft;
use crate::error::IssueCommandError;
use crate::prompt::{Action, Prompter};
use crate::recency::RecencyStore;
use crate::templates::load_templates;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Empty means "not supplied"
    pub title: String,
    pub body: String,
    pub web: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// `--web` opened the new-issue page
    OpenedInBrowser { url: String },
    /// The draft was handed to the browser instead of being created
    Previewed { url: String },
    Discarded,
    Created { url: String, number: u64 },
}

impl CreateOutcome {
    /// Line reported on stderr, if any
    pub fn message(&self) -> Option<String> {
        match self {
            CreateOutcome::OpenedInBrowser { url } => {
                Some(format!("Opening {url} in your browser."))
            }
            CreateOutcome::Previewed { url } => {
                Some(format!("Opening {} in your browser.", display_url(url)))
            }
            CreateOutcome::Discarded => Some("Discarding.".to_string()),
            CreateOutcome::Created { .. } => None,
        }
    }
}

/// `host/path` of a URL, leaving out the scheme and the query
fn display_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => format!("{}{}", parsed.host_str().unwrap_or_default(), parsed.path()),
        Err(_) => url.to_string(),
    }
}

pub fn new_issue_url(repo: &Repo) -> String {
    format!("{}/issues/new", repo.web_url())
}

/// New-issue page pre-filled with the draft
pub fn preview_url(repo: &Repo, title: &str, body: &str) -> String {
    let encode = |value: &str| byte_serialize(value.as_bytes()).collect::<String>();
    format!(
        "{}?title={}&body={}",
        new_issue_url(repo),
        encode(title),
        encode(body)
    )
}

/// Open the new-issue page; with several templates, GitHub's template chooser
pub fn open_new_issue_page(
    browser: &dyn Browser,
    repo: &Repo,
    template_paths: &[PathBuf],
) -> Result<CreateOutcome, IssueCommandError> {
    let mut url = new_issue_url(repo);
    if template_paths.len() > 1 {
        url.push_str("/choose");
    }
    browser.open(&url)?;
    Ok(CreateOutcome::OpenedInBrowser { url })
}

/// Create an issue in the session's repository
pub async fn create_issue(
    transport: &dyn IssueTransport,
    recency: &dyn RecencyStore,
    prompter: &dyn Prompter,
    browser: &dyn Browser,
    session: &Session,
    template_paths: &[PathBuf],
    opts: &CreateOptions,
) -> Result<CreateOutcome, IssueCommandError> {
    let repo = &session.repo;

    if opts.web {
        return open_new_issue_page(browser, repo, template_paths);
    }

    let interactive = draft::needs_prompt(&opts.title, &opts.body);
    if interactive && !session.can_prompt {
        return Err(IssueCommandError::NonInteractiveCreate);
    }

    let meta = transport.fetch_repo_meta(repo).await?;
    if !meta.has_issues_enabled {
        return Err(IssueCommandError::IssuesDisabled(repo.full_name()));
    }

    let templates = if interactive {
        load_templates(template_paths)
    } else {
        Vec::new()
    };
    let draft = draft::collect_title_body(&opts.title, &opts.body, &templates, prompter)?;

    match draft.action {
        Action::Cancel => Ok(CreateOutcome::Discarded),
        Action::Preview => {
            let url = preview_url(repo, &draft.title, &draft.body);
            browser.open(&url)?;
            Ok(CreateOutcome::Previewed { url })
        }
        Action::Submit => {
            let issue = transport
                .create_issue(&meta, &draft.title, &draft.body)
                .await?;

            if let Err(e) = recency.record_visit(repo, false, issue.number, &draft.title) {
                log::warn!("Could not remember issue #{}: {e}", issue.number);
            }

            let url = issue
                .url
                .unwrap_or_else(|| format!("{}/issues/{}", repo.web_url(), issue.number));
            Ok(CreateOutcome::Created {
                url,
                number: issue.number,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_issue_url() {
        assert_eq!(
            new_issue_url(&Repo::new("acme", "widgets")),
            "https://github.com/acme/widgets/issues/new"
        );
    }

    #[test]
    fn test_preview_url_encodes_draft() {
        let url = preview_url(
            &Repo::new("acme", "widgets"),
            "Crash & burn",
            "Steps:\n1. run?",
        );
        assert_eq!(
            url,
            "https://github.com/acme/widgets/issues/new?title=Crash+%26+burn&body=Steps%3A%0A1.+run%3F"
        );
    }

    #[test]
    fn test_preview_message_hides_query() {
        let outcome = CreateOutcome::Previewed {
            url: "https://github.com/acme/widgets/issues/new?title=a&body=b".to_string(),
        };
        assert_eq!(
            outcome.message().as_deref(),
            Some("Opening github.com/acme/widgets/issues/new in your browser.")
        );
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            CreateOutcome::Discarded.message().as_deref(),
            Some("Discarding.")
        );
        assert_eq!(
            CreateOutcome::OpenedInBrowser {
                url: "https://github.com/acme/widgets/issues/new".to_string()
            }
            .message()
            .as_deref(),
            Some("Opening https://github.com/acme/widgets/issues/new in your browser.")
        );
        assert_eq!(
            CreateOutcome::Created {
                url: "https://github.com/acme/widgets/issues/43".to_string(),
                number: 43
            }
            .message(),
            None
        );
    }
}
