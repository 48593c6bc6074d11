// ABOUTME: GraphQL documents for issue queries and mutations, plus their response shapes
// ABOUTME: Issue selections are assembled from the requested IssueField set

use serde::Deserialize;

use crate::types::{Issue, IssueField};

/// Selection set for the requested fields; `__typename` is always included
pub fn issue_selection(fields: &[IssueField]) -> String {
    let mut parts = vec!["__typename"];
    for field in fields {
        let selection = field.selection();
        if !parts.contains(&selection) {
            parts.push(selection);
        }
    }
    parts.join(" ")
}

pub fn issue_by_number(fields: &[IssueField]) -> String {
    let selection = issue_selection(fields);
    format!(
        r#"query IssueByNumber($owner: String!, $repo: String!, $number: Int!) {{
  repository(owner: $owner, name: $repo) {{
    issueOrPullRequest(number: $number) {{
      ... on Issue {{ {selection} }}
      ... on PullRequest {{ {selection} }}
    }}
  }}
}}"#
    )
}

pub const REPOSITORY_INFO: &str = r#"query RepositoryInfo($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
    name
    owner { login }
    hasIssuesEnabled
  }
}"#;

pub const VIEWER: &str = r#"query UserCurrent {
  viewer { login }
}"#;

pub const CREATE_ISSUE: &str = r#"mutation IssueCreate($input: CreateIssueInput!) {
  createIssue(input: $input) {
    issue { __typename id number title url state }
  }
}"#;

pub const CLOSE_ISSUE: &str = r#"mutation IssueClose($input: CloseIssueInput!) {
  closeIssue(input: $input) {
    issue { id }
  }
}"#;

pub const CLOSE_PULL_REQUEST: &str = r#"mutation PullRequestClose($input: ClosePullRequestInput!) {
  closePullRequest(input: $input) {
    pullRequest { id }
  }
}"#;

/// Fields shown in list-style output
pub const LIST_FIELDS: &[IssueField] = &[
    IssueField::Number,
    IssueField::Title,
    IssueField::State,
    IssueField::Url,
    IssueField::Labels,
    IssueField::UpdatedAt,
];

pub fn issue_list() -> String {
    let selection = issue_selection(LIST_FIELDS);
    format!(
        r#"query IssueList($owner: String!, $repo: String!, $limit: Int!, $endCursor: String, $states: [IssueState!], $labels: [String!], $assignee: String) {{
  repository(owner: $owner, name: $repo) {{
    hasIssuesEnabled
    issues(first: $limit, after: $endCursor, orderBy: {{field: CREATED_AT, direction: DESC}}, states: $states, labels: $labels, filterBy: {{assignee: $assignee}}) {{
      totalCount
      pageInfo {{ hasNextPage endCursor }}
      nodes {{ {selection} }}
    }}
  }}
}}"#
    )
}

pub fn issue_status() -> String {
    let selection = issue_selection(LIST_FIELDS);
    let connection = format!("totalCount nodes {{ {selection} }}");
    format!(
        r#"query IssueStatus($owner: String!, $repo: String!, $viewer: String!, $perPage: Int!) {{
  repository(owner: $owner, name: $repo) {{
    hasIssuesEnabled
    assigned: issues(filterBy: {{assignee: $viewer, states: OPEN}}, first: $perPage, orderBy: {{field: UPDATED_AT, direction: DESC}}) {{ {connection} }}
    mentioned: issues(filterBy: {{mentioned: $viewer, states: OPEN}}, first: $perPage, orderBy: {{field: UPDATED_AT, direction: DESC}}) {{ {connection} }}
    authored: issues(filterBy: {{createdBy: $viewer, states: OPEN}}, first: $perPage, orderBy: {{field: UPDATED_AT, direction: DESC}}) {{ {connection} }}
  }}
}}"#
    )
}

// Response shapes

#[derive(Debug, Deserialize)]
pub(crate) struct IssueByNumberData {
    pub repository: Option<IssueByNumberRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueByNumberRepository {
    pub issue_or_pull_request: Option<Issue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryInfoData {
    pub repository: Option<RepositoryInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryInfo {
    pub id: String,
    pub name: String,
    pub owner: OwnerLogin,
    pub has_issues_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerLogin {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewerData {
    pub viewer: OwnerLogin,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateIssueData {
    pub create_issue: Option<CreateIssuePayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateIssuePayload {
    pub issue: Option<Issue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueListData {
    pub repository: Option<IssueListRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueListRepository {
    pub has_issues_enabled: bool,
    pub issues: IssuePage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssuePage {
    pub total_count: usize,
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub nodes: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueStatusData {
    pub repository: Option<IssueStatusRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueStatusRepository {
    pub has_issues_enabled: bool,
    pub assigned: IssuePage,
    pub mentioned: IssuePage,
    pub authored: IssuePage,
}
