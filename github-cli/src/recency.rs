// ABOUTME: Recently visited issues ranked by frecency, persisted as a JSON file
// ABOUTME: Feeds the interactive picker used when a command is run without an issue argument

use chrono::{DateTime, Utc};
use github_sdk::Repo;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::frecency::{AGE_WEIGHTS, OLDEST_WEIGHT};
use crate::error::IssueCommandError;
use crate::prompt::Prompter;

#[derive(Debug, Error)]
pub enum RecencyError {
    #[error("failed to read recent issues from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write recent issues to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("recent issues file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A visited issue as remembered locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentIssue {
    pub number: u64,
    pub title: String,
    pub visits: u32,
    pub last_visited: DateTime<Utc>,
}

pub trait RecencyStore {
    /// Issues for `repo` of the given kind, most relevant first
    fn get_recent(&self, repo: &Repo, is_pr: bool) -> Result<Vec<RecentIssue>, RecencyError>;

    fn delete_by_number(&self, repo: &Repo, is_pr: bool, number: u64) -> Result<(), RecencyError>;

    fn record_visit(
        &self,
        repo: &Repo,
        is_pr: bool,
        number: u64,
        title: &str,
    ) -> Result<(), RecencyError>;
}

/// Frecency score of an entry at `now`
pub fn frecency_score(visits: u32, last_visited: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let age_days = (now - last_visited).num_days();
    let weight = AGE_WEIGHTS
        .iter()
        .find(|(max_days, _)| age_days < *max_days)
        .map(|(_, weight)| *weight)
        .unwrap_or(OLDEST_WEIGHT);
    u64::from(visits) * weight
}

/// Order entries by score, breaking ties with the most recent visit
pub fn rank(mut issues: Vec<RecentIssue>, now: DateTime<Utc>) -> Vec<RecentIssue> {
    issues.sort_by(|a, b| {
        frecency_score(b.visits, b.last_visited, now)
            .cmp(&frecency_score(a.visits, a.last_visited, now))
            .then(b.last_visited.cmp(&a.last_visited))
    });
    issues
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecencyFile {
    #[serde(default)]
    entries: Vec<StoredEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    repo: String,
    pull_request: bool,
    #[serde(flatten)]
    issue: RecentIssue,
}

impl StoredEntry {
    fn matches(&self, key: &str, is_pr: bool) -> bool {
        self.repo == key && self.pull_request == is_pr
    }
}

fn repo_key(repo: &Repo) -> String {
    format!("{}/{}/{}", repo.host, repo.owner, repo.name).to_ascii_lowercase()
}

/// JSON-file backed store; the file is rewritten whole on every change
pub struct FileRecencyStore {
    path: PathBuf,
}

impl FileRecencyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<RecencyFile, RecencyError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(RecencyFile::default());
            }
            Err(source) => {
                return Err(RecencyError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| RecencyError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, file: &RecencyFile) -> Result<(), RecencyError> {
        let write_err = |source: std::io::Error| RecencyError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_json::to_string_pretty(file)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        std::fs::write(&self.path, content).map_err(write_err)
    }
}

impl RecencyStore for FileRecencyStore {
    fn get_recent(&self, repo: &Repo, is_pr: bool) -> Result<Vec<RecentIssue>, RecencyError> {
        let key = repo_key(repo);
        let issues = self
            .load()?
            .entries
            .into_iter()
            .filter(|entry| entry.matches(&key, is_pr))
            .map(|entry| entry.issue)
            .collect();

        Ok(rank(issues, Utc::now()))
    }

    fn delete_by_number(
        &self,
        repo: &Repo,
        is_pr: bool,
        number: u64,
    ) -> Result<(), RecencyError> {
        let key = repo_key(repo);
        let mut file = self.load()?;
        let before = file.entries.len();
        file.entries
            .retain(|entry| !(entry.matches(&key, is_pr) && entry.issue.number == number));

        if file.entries.len() == before {
            return Ok(());
        }
        self.save(&file)
    }

    fn record_visit(
        &self,
        repo: &Repo,
        is_pr: bool,
        number: u64,
        title: &str,
    ) -> Result<(), RecencyError> {
        let key = repo_key(repo);
        let now = Utc::now();
        let mut file = self.load()?;

        match file
            .entries
            .iter_mut()
            .find(|entry| entry.matches(&key, is_pr) && entry.issue.number == number)
        {
            Some(entry) => {
                entry.issue.visits = entry.issue.visits.saturating_add(1);
                entry.issue.last_visited = now;
                entry.issue.title = title.to_string();
            }
            None => file.entries.push(StoredEntry {
                repo: key,
                pull_request: is_pr,
                issue: RecentIssue {
                    number,
                    title: title.to_string(),
                    visits: 1,
                    last_visited: now,
                },
            }),
        }

        self.save(&file)
    }
}

/// Outcome of the interactive recent-issue picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Selector for the chosen issue
    Chosen(String),
    /// Nothing to choose from
    Empty,
    /// The user dismissed the prompt
    Cancelled,
}

pub fn select_interactively(
    store: &dyn RecencyStore,
    prompter: &dyn Prompter,
    repo: &Repo,
    is_pr: bool,
) -> Result<Selection, IssueCommandError> {
    let candidates = store.get_recent(repo, is_pr)?;
    if candidates.is_empty() {
        return Ok(Selection::Empty);
    }

    let items: Vec<String> = candidates
        .iter()
        .map(|issue| format!("#{}  {}", issue.number, issue.title))
        .collect();

    let selection = match prompter.select_one("Select an issue", &items)? {
        Some(index) => match candidates.get(index) {
            Some(issue) => Selection::Chosen(issue.number.to_string()),
            None => unreachable!("picker returned index {index} of {}", items.len()),
        },
        None => Selection::Cancelled,
    };
    Ok(selection)
}
