// ABOUTME: Domain types for repositories, issues, and pull requests returned by the GitHub API
// ABOUTME: Issue records deserialize from any subset of fields, missing ones take defaults

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::urls::DEFAULT_HOST;
use crate::error::GitHubError;

/// A repository on a specific GitHub host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repo {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl Repo {
    /// Repository on github.com
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_host(DEFAULT_HOST, owner, name)
    }

    pub fn with_host(
        host: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let host: String = host.into();
        Self {
            host: host.to_ascii_lowercase(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Web address of the repository, e.g. `https://github.com/acme/widgets`
    pub fn web_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.name)
    }

    /// Same owner and name, ignoring case (GitHub treats both case-insensitively)
    pub fn is_same(&self, other: &Repo) -> bool {
        self.host.eq_ignore_ascii_case(&other.host)
            && self.owner.eq_ignore_ascii_case(&other.owner)
            && self.name.eq_ignore_ascii_case(&other.name)
    }

    /// Parse `OWNER/REPO`, `HOST/OWNER/REPO` or a repository web URL,
    /// using `default_host` when the input names no host.
    pub fn parse_with_host(input: &str, default_host: &str) -> Result<Self, GitHubError> {
        let invalid = || {
            GitHubError::Configuration(format!(
                "expected the \"[HOST/]OWNER/REPO\" format, got {input:?}"
            ))
        };

        let trimmed = input.trim();
        if let Some(url) = url::Url::parse(trimmed).ok().filter(|url| url.has_host()) {
            let host = url.host_str().ok_or_else(invalid)?;
            let mut segments = url
                .path_segments()
                .ok_or_else(invalid)?
                .filter(|s| !s.is_empty());
            let owner = segments.next().ok_or_else(invalid)?;
            let name = segments.next().ok_or_else(invalid)?;
            return Ok(Self::with_host(
                host,
                owner,
                name.trim_end_matches(".git"),
            ));
        }

        let parts: Vec<&str> = trimmed.split('/').collect();
        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::with_host(default_host, *owner, *name))
            }
            [host, owner, name] if !host.is_empty() && !owner.is_empty() && !name.is_empty() => {
                Ok(Self::with_host(*host, *owner, *name))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for Repo {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_host(s, DEFAULT_HOST)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
    /// Only pull requests reach this state
    Merged,
}

impl IssueState {
    pub fn is_closed(self) -> bool {
        matches!(self, IssueState::Closed | IssueState::Merged)
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "OPEN"),
            IssueState::Closed => write!(f, "CLOSED"),
            IssueState::Merged => write!(f, "MERGED"),
        }
    }
}

/// Issues and pull requests share one number space per repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IssueKind {
    #[default]
    Issue,
    PullRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    #[serde(default)]
    pub nodes: Vec<Label>,
    #[serde(default)]
    pub total_count: usize,
}

impl Labels {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|l| l.name.as_str())
    }

    /// The server returned fewer labels than the issue carries
    pub fn is_truncated(&self) -> bool {
        self.total_count > self.nodes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub login: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comments {
    #[serde(default)]
    pub total_count: usize,
}

/// Canonical issue or pull request record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "__typename", default)]
    pub kind: IssueKind,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub state: IssueState,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Comments,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.kind == IssueKind::PullRequest
    }

    pub fn author_login(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.login.as_str())
            .unwrap_or("ghost")
    }
}

/// Fields that can be requested when fetching a single issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueField {
    Id,
    Number,
    Title,
    State,
    Body,
    Url,
    Author,
    Labels,
    Comments,
    UpdatedAt,
}

impl IssueField {
    pub const ALL: &'static [IssueField] = &[
        IssueField::Id,
        IssueField::Number,
        IssueField::Title,
        IssueField::State,
        IssueField::Body,
        IssueField::Url,
        IssueField::Author,
        IssueField::Labels,
        IssueField::Comments,
        IssueField::UpdatedAt,
    ];

    /// GraphQL selection for this field
    pub fn selection(self) -> &'static str {
        match self {
            IssueField::Id => "id",
            IssueField::Number => "number",
            IssueField::Title => "title",
            IssueField::State => "state",
            IssueField::Body => "body",
            IssueField::Url => "url",
            IssueField::Author => "author { login }",
            IssueField::Labels => "labels(first: 3) { nodes { name } totalCount }",
            IssueField::Comments => "comments { totalCount }",
            IssueField::UpdatedAt => "updatedAt",
        }
    }
}

/// Repository facts needed before creating issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoMeta {
    pub id: String,
    pub repo: Repo,
    pub has_issues_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueStateFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl IssueStateFilter {
    /// Values for the `states` argument of `Repository.issues`
    pub fn graphql_states(self) -> &'static [&'static str] {
        match self {
            IssueStateFilter::Open => &["OPEN"],
            IssueStateFilter::Closed => &["CLOSED"],
            IssueStateFilter::All => &["OPEN", "CLOSED"],
        }
    }
}

impl FromStr for IssueStateFilter {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(IssueStateFilter::Open),
            "closed" => Ok(IssueStateFilter::Closed),
            "all" => Ok(IssueStateFilter::All),
            other => Err(GitHubError::Configuration(format!(
                "invalid state: {other}. Must be one of: open, closed, all"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueFilters {
    pub state: IssueStateFilter,
    pub labels: Vec<String>,
    pub assignee: Option<String>,
    pub limit: usize,
}

impl Default for IssueFilters {
    fn default() -> Self {
        Self {
            state: IssueStateFilter::Open,
            labels: Vec::new(),
            assignee: None,
            limit: 30,
        }
    }
}

/// A page-independent slice of issues plus the server-side total
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueConnection {
    pub total_count: usize,
    pub issues: Vec<Issue>,
}

/// Open issues relevant to one user in one repository
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueStatusPayload {
    pub assigned: IssueConnection,
    pub mentioned: IssueConnection,
    pub authored: IssueConnection,
}
