// ABOUTME: GraphQL request builder and response envelope for the GitHub API
// ABOUTME: Carries query text, variables, and the error entries GitHub returns

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::GitHubError;

/// Builder for a GraphQL request body
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    query: String,
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    operation_name: Option<String>,
    variables: HashMap<String, serde_json::Value>,
}

impl GraphQLRequest {
    /// Create a new request from query text
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: HashMap::new(),
        }
    }

    /// Name the operation (GitHub reports it in audit logs)
    pub fn operation(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Add a variable to the request
    pub fn variable<T: Serialize>(mut self, name: impl Into<String>, value: T) -> Self {
        self.variables.insert(
            name.into(),
            serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        );
        self
    }

    /// Get the query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Get the operation name
    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Get the variables
    pub fn variables(&self) -> &HashMap<String, serde_json::Value> {
        &self.variables
    }
}

/// A single entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphQLErrorEntry {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
}

impl GraphQLErrorEntry {
    /// Path segments as strings; list indices are rendered as numbers
    pub fn path_segments(&self) -> Vec<String> {
        self.path
            .as_ref()
            .map(|segments| {
                segments
                    .iter()
                    .map(|s| match s {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Response envelope returned by the GraphQL endpoint
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLErrorEntry>>,
}

impl<T: DeserializeOwned> GraphQLResponse<T> {
    /// Turn the envelope into data or a classified error.
    ///
    /// Errors win over partial data: GitHub returns `null` for the failing
    /// field alongside the error, and callers expect a hard failure.
    pub fn into_result(self) -> Result<T, GitHubError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            return Err(GitHubError::from_graphql_errors(errors));
        }

        self.data.ok_or_else(|| GitHubError::InvalidResponse {
            message: "No data in response".to_string(),
        })
    }
}
