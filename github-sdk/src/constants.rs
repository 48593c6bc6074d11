// ABOUTME: Centralized constants for the GitHub SDK
// ABOUTME: Contains API endpoints, timeouts, and paging limits

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// GitHub URLs
pub mod urls {
    /// Public web host
    pub const DEFAULT_HOST: &str = "github.com";

    /// GraphQL endpoint for github.com
    pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

    /// GraphQL endpoint for a host; Enterprise Server serves it under `/api/graphql`
    pub fn graphql_endpoint(host: &str) -> String {
        if host.eq_ignore_ascii_case(DEFAULT_HOST) {
            GITHUB_GRAPHQL_ENDPOINT.to_string()
        } else {
            format!("https://{host}/api/graphql")
        }
    }
}

/// Paging limits of the GraphQL API
pub mod limits {
    /// Largest `first:` argument GitHub accepts on a connection
    pub const MAX_PAGE_SIZE: usize = 100;

    /// Issues shown per section of the status view
    pub const STATUS_PER_SECTION: usize = 10;
}

/// Response headers consulted for rate limiting
pub mod headers {
    pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
    pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";
}
