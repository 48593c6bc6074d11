// ABOUTME: Narrow capability traits for issue operations and their GitHubClient implementation
// ABOUTME: Workflows depend on these traits so tests can substitute in-memory fakes

use async_trait::async_trait;
use serde_json::json;

use crate::constants::limits::MAX_PAGE_SIZE;
use crate::error::GitHubError;
use crate::graphql::GraphQLRequest;
use crate::queries::{self, *};
use crate::types::{
    Issue, IssueConnection, IssueField, IssueFilters, IssueStatusPayload, Repo, RepoMeta,
};
use crate::{GitHubClient, Result};

/// Operations the resolve/create/close workflows need from the remote service
#[async_trait]
pub trait IssueTransport: Send + Sync {
    /// Fetch an issue or pull request by number, requesting only `fields`
    async fn fetch_issue(&self, repo: &Repo, number: u64, fields: &[IssueField]) -> Result<Issue>;

    /// Create an issue; the returned record carries at least `url` and `number`
    async fn create_issue(&self, repo: &RepoMeta, title: &str, body: &str) -> Result<Issue>;

    async fn close_issue(&self, id: &str) -> Result<()>;

    async fn close_pull_request(&self, id: &str) -> Result<()>;

    async fn fetch_repo_meta(&self, repo: &Repo) -> Result<RepoMeta>;
}

/// Read-only listing operations used by `issue list` and `issue status`
#[async_trait]
pub trait IssueQueries: Send + Sync {
    async fn list_issues(&self, repo: &Repo, filters: &IssueFilters) -> Result<IssueListing>;

    async fn issue_status(
        &self,
        repo: &Repo,
        login: &str,
        per_section: usize,
    ) -> Result<IssueStatusPayload>;

    /// Login of the authenticated user
    async fn viewer_login(&self) -> Result<String>;
}

/// Result of a list query
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueListing {
    pub has_issues_enabled: bool,
    pub connection: IssueConnection,
}

fn repository_missing(repo: &Repo) -> GitHubError {
    GitHubError::NotFound {
        message: format!("Could not resolve to a Repository with the name '{repo}'."),
        path: vec!["repository".to_string()],
    }
}

#[async_trait]
impl IssueTransport for GitHubClient {
    async fn fetch_issue(&self, repo: &Repo, number: u64, fields: &[IssueField]) -> Result<Issue> {
        let not_found = || GitHubError::IssueNotFound {
            repo: repo.full_name(),
            number,
        };

        // GraphQL Int is 32-bit; nothing above it can exist
        let Ok(graphql_number) = i32::try_from(number) else {
            return Err(not_found());
        };

        let request = GraphQLRequest::new(queries::issue_by_number(fields))
            .operation("IssueByNumber")
            .variable("owner", &repo.owner)
            .variable("repo", &repo.name)
            .variable("number", graphql_number);

        let data: IssueByNumberData = match self.execute(&request).await {
            Ok(data) => data,
            Err(GitHubError::NotFound { path, .. })
                if path.last().map(String::as_str) == Some("issueOrPullRequest") =>
            {
                return Err(not_found());
            }
            Err(e) => return Err(e),
        };

        data.repository
            .ok_or_else(|| repository_missing(repo))?
            .issue_or_pull_request
            .ok_or_else(not_found)
    }

    async fn create_issue(&self, repo: &RepoMeta, title: &str, body: &str) -> Result<Issue> {
        let request = GraphQLRequest::new(CREATE_ISSUE)
            .operation("IssueCreate")
            .variable(
                "input",
                json!({
                    "repositoryId": repo.id,
                    "title": title,
                    "body": body,
                }),
            );

        let data: CreateIssueData = self.execute(&request).await?;
        data.create_issue
            .and_then(|payload| payload.issue)
            .ok_or_else(|| GitHubError::InvalidResponse {
                message: "createIssue returned no issue".to_string(),
            })
    }

    async fn close_issue(&self, id: &str) -> Result<()> {
        let request = GraphQLRequest::new(CLOSE_ISSUE)
            .operation("IssueClose")
            .variable("input", json!({ "issueId": id }));

        self.execute::<serde_json::Value>(&request).await?;
        Ok(())
    }

    async fn close_pull_request(&self, id: &str) -> Result<()> {
        let request = GraphQLRequest::new(CLOSE_PULL_REQUEST)
            .operation("PullRequestClose")
            .variable("input", json!({ "pullRequestId": id }));

        self.execute::<serde_json::Value>(&request).await?;
        Ok(())
    }

    async fn fetch_repo_meta(&self, repo: &Repo) -> Result<RepoMeta> {
        let request = GraphQLRequest::new(REPOSITORY_INFO)
            .operation("RepositoryInfo")
            .variable("owner", &repo.owner)
            .variable("name", &repo.name);

        let data: RepositoryInfoData = self.execute(&request).await?;
        let info = data.repository.ok_or_else(|| repository_missing(repo))?;

        Ok(RepoMeta {
            id: info.id,
            repo: Repo::with_host(repo.host.clone(), info.owner.login, info.name),
            has_issues_enabled: info.has_issues_enabled,
        })
    }
}

#[async_trait]
impl IssueQueries for GitHubClient {
    async fn list_issues(&self, repo: &Repo, filters: &IssueFilters) -> Result<IssueListing> {
        let query = queries::issue_list();
        let labels = (!filters.labels.is_empty()).then_some(&filters.labels);

        let mut listing = IssueListing::default();
        let mut cursor: Option<String> = None;

        loop {
            let remaining = filters.limit - listing.connection.issues.len();
            let request = GraphQLRequest::new(query.as_str())
                .operation("IssueList")
                .variable("owner", &repo.owner)
                .variable("repo", &repo.name)
                .variable("limit", remaining.min(MAX_PAGE_SIZE))
                .variable("endCursor", &cursor)
                .variable("states", filters.state.graphql_states())
                .variable("labels", labels)
                .variable("assignee", &filters.assignee);

            let data: IssueListData = self.execute(&request).await?;
            let repository = data.repository.ok_or_else(|| repository_missing(repo))?;

            listing.has_issues_enabled = repository.has_issues_enabled;
            listing.connection.total_count = repository.issues.total_count;
            listing.connection.issues.extend(repository.issues.nodes);

            match repository.issues.page_info {
                Some(page)
                    if page.has_next_page
                        && listing.connection.issues.len() < filters.limit =>
                {
                    cursor = page.end_cursor;
                }
                _ => break,
            }
        }

        listing.connection.issues.truncate(filters.limit);
        Ok(listing)
    }

    async fn issue_status(
        &self,
        repo: &Repo,
        login: &str,
        per_section: usize,
    ) -> Result<IssueStatusPayload> {
        let request = GraphQLRequest::new(queries::issue_status())
            .operation("IssueStatus")
            .variable("owner", &repo.owner)
            .variable("repo", &repo.name)
            .variable("viewer", login)
            .variable("perPage", per_section.min(MAX_PAGE_SIZE));

        let data: IssueStatusData = self.execute(&request).await?;
        let repository = data.repository.ok_or_else(|| repository_missing(repo))?;

        if !repository.has_issues_enabled {
            return Err(GitHubError::GraphQL {
                message: format!("the '{repo}' repository has disabled issues"),
                errors: vec![],
            });
        }

        let into_connection = |page: IssuePage| IssueConnection {
            total_count: page.total_count,
            issues: page.nodes,
        };

        Ok(IssueStatusPayload {
            assigned: into_connection(repository.assigned),
            mentioned: into_connection(repository.mentioned),
            authored: into_connection(repository.authored),
        })
    }

    async fn viewer_login(&self) -> Result<String> {
        let request = GraphQLRequest::new(VIEWER).operation("UserCurrent");
        let data: ViewerData = self.execute(&request).await?;
        Ok(data.viewer.login)
    }
}
