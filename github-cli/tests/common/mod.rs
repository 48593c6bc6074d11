// ABOUTME: In-memory fakes for the issue workflow collaborators
// ABOUTME: Each fake records how it was called so tests can assert on side effects

#![allow(dead_code)]

use async_trait::async_trait;
use github_cli::browser::Browser;
use github_cli::context::Session;
use github_cli::error::IssueCommandError;
use github_cli::prompt::{Action, Prompter, TitleBody};
use github_cli::recency::{RecencyError, RecencyStore, RecentIssue};
use github_cli::templates::Template;
use github_sdk::transport::IssueListing;
use github_sdk::{
    GitHubError, Issue, IssueConnection, IssueField, IssueFilters, IssueKind, IssueQueries,
    IssueState, IssueStatusPayload, IssueTransport, Repo, RepoMeta,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

pub fn acme() -> Repo {
    Repo::new("acme", "widgets")
}

pub fn session(can_prompt: bool) -> Session {
    Session {
        repo: acme(),
        can_prompt,
        stdout_tty: false,
        color: false,
    }
}

pub fn issue(number: u64, title: &str, state: IssueState, kind: IssueKind) -> Issue {
    Issue {
        kind,
        id: format!("NODE_{number}"),
        number,
        title: title.to_string(),
        state,
        ..Default::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchIssue { repo: String, number: u64 },
    CreateIssue { title: String, body: String },
    CloseIssue(String),
    ClosePullRequest(String),
    FetchRepoMeta(String),
    ListIssues(IssueFilters),
    IssueStatus { login: String },
    ViewerLogin,
}

pub struct FakeTransport {
    issues: HashMap<(String, u64), Issue>,
    has_issues_enabled: bool,
    listing: Vec<Issue>,
    fail_mutations: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            issues: HashMap::new(),
            has_issues_enabled: true,
            listing: Vec::new(),
            fail_mutations: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_issue(mut self, repo: &Repo, issue: Issue) -> Self {
        self.issues.insert((repo.full_name(), issue.number), issue);
        self
    }

    pub fn with_listing(mut self, issues: Vec<Issue>) -> Self {
        self.listing = issues;
        self
    }

    pub fn issues_disabled(mut self) -> Self {
        self.has_issues_enabled = false;
        self
    }

    /// Every create and close is rejected by the server
    pub fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::CreateIssue { .. } | Call::CloseIssue(_) | Call::ClosePullRequest(_)
                )
            })
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_result(&self) -> Result<(), GitHubError> {
        if self.fail_mutations {
            return Err(GitHubError::GraphQL {
                message: "Resource not accessible by integration".to_string(),
                errors: vec![],
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IssueTransport for FakeTransport {
    async fn fetch_issue(
        &self,
        repo: &Repo,
        number: u64,
        _fields: &[IssueField],
    ) -> Result<Issue, GitHubError> {
        self.record(Call::FetchIssue {
            repo: repo.full_name(),
            number,
        });
        self.issues
            .get(&(repo.full_name(), number))
            .cloned()
            .ok_or_else(|| GitHubError::IssueNotFound {
                repo: repo.full_name(),
                number,
            })
    }

    async fn create_issue(
        &self,
        repo: &RepoMeta,
        title: &str,
        body: &str,
    ) -> Result<Issue, GitHubError> {
        self.record(Call::CreateIssue {
            title: title.to_string(),
            body: body.to_string(),
        });
        self.mutation_result()?;
        Ok(Issue {
            number: 43,
            title: title.to_string(),
            url: Some(format!("{}/issues/43", repo.repo.web_url())),
            ..Default::default()
        })
    }

    async fn close_issue(&self, id: &str) -> Result<(), GitHubError> {
        self.record(Call::CloseIssue(id.to_string()));
        self.mutation_result()
    }

    async fn close_pull_request(&self, id: &str) -> Result<(), GitHubError> {
        self.record(Call::ClosePullRequest(id.to_string()));
        self.mutation_result()
    }

    async fn fetch_repo_meta(&self, repo: &Repo) -> Result<RepoMeta, GitHubError> {
        self.record(Call::FetchRepoMeta(repo.full_name()));
        Ok(RepoMeta {
            id: "R_kgDOAAA".to_string(),
            repo: repo.clone(),
            has_issues_enabled: self.has_issues_enabled,
        })
    }
}

#[async_trait]
impl IssueQueries for FakeTransport {
    async fn list_issues(
        &self,
        _repo: &Repo,
        filters: &IssueFilters,
    ) -> Result<IssueListing, GitHubError> {
        self.record(Call::ListIssues(filters.clone()));
        Ok(IssueListing {
            has_issues_enabled: self.has_issues_enabled,
            connection: IssueConnection {
                total_count: self.listing.len(),
                issues: self.listing.clone(),
            },
        })
    }

    async fn issue_status(
        &self,
        _repo: &Repo,
        login: &str,
        _per_section: usize,
    ) -> Result<IssueStatusPayload, GitHubError> {
        self.record(Call::IssueStatus {
            login: login.to_string(),
        });
        Ok(IssueStatusPayload {
            assigned: IssueConnection {
                total_count: self.listing.len(),
                issues: self.listing.clone(),
            },
            ..Default::default()
        })
    }

    async fn viewer_login(&self) -> Result<String, GitHubError> {
        self.record(Call::ViewerLogin);
        Ok("octocat".to_string())
    }
}

#[derive(Default)]
pub struct FakeRecencyStore {
    pub recent: Vec<RecentIssue>,
    pub fail_writes: bool,
    deleted: Mutex<Vec<(Repo, bool, u64)>>,
    recorded: Mutex<Vec<(Repo, bool, u64, String)>>,
}

impl FakeRecencyStore {
    pub fn with_recent(recent: Vec<RecentIssue>) -> Self {
        Self {
            recent,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn deleted(&self) -> Vec<(Repo, bool, u64)> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn recorded(&self) -> Vec<(Repo, bool, u64, String)> {
        self.recorded.lock().unwrap().clone()
    }

    fn write_error(&self) -> RecencyError {
        RecencyError::Write {
            path: PathBuf::from("/nonexistent/recent.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        }
    }
}

impl RecencyStore for FakeRecencyStore {
    fn get_recent(&self, _repo: &Repo, _is_pr: bool) -> Result<Vec<RecentIssue>, RecencyError> {
        Ok(self.recent.clone())
    }

    fn delete_by_number(&self, repo: &Repo, is_pr: bool, number: u64) -> Result<(), RecencyError> {
        if self.fail_writes {
            return Err(self.write_error());
        }
        self.deleted
            .lock()
            .unwrap()
            .push((repo.clone(), is_pr, number));
        Ok(())
    }

    fn record_visit(
        &self,
        repo: &Repo,
        is_pr: bool,
        number: u64,
        title: &str,
    ) -> Result<(), RecencyError> {
        if self.fail_writes {
            return Err(self.write_error());
        }
        self.recorded
            .lock()
            .unwrap()
            .push((repo.clone(), is_pr, number, title.to_string()));
        Ok(())
    }
}

/// Answers prompts from a script and counts how often it was asked
#[derive(Default)]
pub struct FakePrompter {
    pub draft: Option<TitleBody>,
    pub pick: Option<usize>,
    drafts_requested: Mutex<Vec<(String, String, usize)>>,
    picks_requested: Mutex<Vec<Vec<String>>>,
}

impl FakePrompter {
    pub fn answering(title: &str, body: &str, action: Action) -> Self {
        Self {
            draft: Some(TitleBody {
                title: title.to_string(),
                body: body.to_string(),
                action,
            }),
            ..Default::default()
        }
    }

    pub fn picking(index: Option<usize>) -> Self {
        Self {
            pick: index,
            ..Default::default()
        }
    }

    pub fn drafts_requested(&self) -> Vec<(String, String, usize)> {
        self.drafts_requested.lock().unwrap().clone()
    }

    pub fn picks_requested(&self) -> Vec<Vec<String>> {
        self.picks_requested.lock().unwrap().clone()
    }
}

impl Prompter for FakePrompter {
    fn collect_title_body(
        &self,
        seed_title: &str,
        seed_body: &str,
        templates: &[Template],
    ) -> Result<TitleBody, IssueCommandError> {
        self.drafts_requested.lock().unwrap().push((
            seed_title.to_string(),
            seed_body.to_string(),
            templates.len(),
        ));
        match &self.draft {
            Some(draft) => Ok(draft.clone()),
            None => panic!("unexpected draft prompt"),
        }
    }

    fn select_one(
        &self,
        _prompt: &str,
        items: &[String],
    ) -> Result<Option<usize>, IssueCommandError> {
        self.picks_requested.lock().unwrap().push(items.to_vec());
        Ok(self.pick)
    }
}

#[derive(Default)]
pub struct FakeBrowser {
    opened: Mutex<Vec<String>>,
}

impl FakeBrowser {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Browser for FakeBrowser {
    fn open(&self, url: &str) -> Result<(), IssueCommandError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
