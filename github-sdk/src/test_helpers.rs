// ABOUTME: Test helper utilities for mocking GitHub GraphQL responses and server
// ABOUTME: Provides mockito-based helpers for unit testing API interactions

use mockito::{Server, ServerGuard};
use serde_json::json;

pub async fn mock_github_server() -> ServerGuard {
    Server::new_async().await
}

pub fn mock_viewer_response() -> serde_json::Value {
    json!({
        "data": {
            "viewer": {
                "login": "octocat"
            }
        }
    })
}

pub fn mock_graphql_error_response() -> serde_json::Value {
    json!({
        "errors": [
            {
                "message": "Field 'unknown' doesn't exist on type 'Query'",
                "path": ["query", "unknown"]
            }
        ]
    })
}

pub fn mock_issue_response() -> serde_json::Value {
    json!({
        "data": {
            "repository": {
                "issueOrPullRequest": {
                    "__typename": "Issue",
                    "id": "I_kwDOAAABAA",
                    "number": 42,
                    "title": "Widgets fall over",
                    "state": "OPEN",
                    "body": "They tip when loaded.",
                    "url": "https://github.com/acme/widgets/issues/42",
                    "author": { "login": "hubot" },
                    "labels": {
                        "nodes": [
                            { "name": "bug" },
                            { "name": "p1" },
                            { "name": "widgets" }
                        ],
                        "totalCount": 4
                    },
                    "comments": { "totalCount": 2 },
                    "updatedAt": "2024-03-01T12:00:00Z"
                }
            }
        }
    })
}

pub fn mock_pull_request_response() -> serde_json::Value {
    json!({
        "data": {
            "repository": {
                "issueOrPullRequest": {
                    "__typename": "PullRequest",
                    "id": "PR_kwDOAAABBB"
                }
            }
        }
    })
}

pub fn mock_issue_not_found_response() -> serde_json::Value {
    json!({
        "data": {
            "repository": {
                "issueOrPullRequest": null
            }
        },
        "errors": [
            {
                "type": "NOT_FOUND",
                "path": ["repository", "issueOrPullRequest"],
                "message": "Could not resolve to an issue or pull request with the number of 999."
            }
        ]
    })
}

pub fn mock_repository_response(has_issues_enabled: bool) -> serde_json::Value {
    json!({
        "data": {
            "repository": {
                "id": "R_kgDOAAA",
                "name": "widgets",
                "owner": { "login": "acme" },
                "hasIssuesEnabled": has_issues_enabled
            }
        }
    })
}

pub fn mock_create_issue_response() -> serde_json::Value {
    json!({
        "data": {
            "createIssue": {
                "issue": {
                    "__typename": "Issue",
                    "id": "I_kwDOAAABAB",
                    "number": 43,
                    "title": "New widget",
                    "url": "https://github.com/acme/widgets/issues/43",
                    "state": "OPEN"
                }
            }
        }
    })
}

pub fn mock_issue_list_response() -> serde_json::Value {
    json!({
        "data": {
            "repository": {
                "hasIssuesEnabled": true,
                "issues": {
                    "totalCount": 2,
                    "pageInfo": { "hasNextPage": false, "endCursor": "Y3Vyc29yOjI=" },
                    "nodes": [
                        {
                            "__typename": "Issue",
                            "number": 12,
                            "title": "Crash on startup",
                            "state": "OPEN",
                            "url": "https://github.com/acme/widgets/issues/12",
                            "labels": { "nodes": [{ "name": "bug" }], "totalCount": 1 },
                            "updatedAt": "2024-03-02T09:30:00Z"
                        },
                        {
                            "__typename": "Issue",
                            "number": 9,
                            "title": "Docs typo",
                            "state": "OPEN",
                            "url": "https://github.com/acme/widgets/issues/9",
                            "labels": { "nodes": [], "totalCount": 0 },
                            "updatedAt": "2024-02-20T16:00:00Z"
                        }
                    ]
                }
            }
        }
    })
}
