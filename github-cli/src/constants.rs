// ABOUTME: Centralized constants for the GitHub CLI application
// ABOUTME: Contains limits, timeouts, file names, environment variables, and recency weights

/// Default limits for issue queries
pub mod limits {
    pub const DEFAULT_LIST_LIMIT: usize = 30;

    /// Titles in the status view are cut to this many characters
    pub const STATUS_TITLE_WIDTH: usize = 70;
}

/// Timeout configurations for terminal feedback
pub mod timeouts {
    /// Progress spinner tick interval for smooth animation
    pub const PROGRESS_BAR_TICK_MS: u64 = 80;
}

/// Config and state file names
pub mod files {
    pub const PROJECT_CONFIG_FILE: &str = "github-cli.toml";
    pub const CONFIG_DIR_NAME: &str = "github-cli";
    pub const CONFIG_FILE: &str = "config.toml";
    pub const RECENCY_FILE: &str = "recent.json";

    /// Directory and file stem GitHub uses for issue templates
    pub const ISSUE_TEMPLATE: &str = "ISSUE_TEMPLATE";
}

/// Environment variables consulted at startup
pub mod env {
    pub const TOKEN_VARS: &[&str] = &["GH_TOKEN", "GITHUB_TOKEN"];
    pub const REPO: &str = "GH_REPO";
    pub const HOST: &str = "GH_HOST";
    pub const NO_COLOR: &str = "NO_COLOR";

    /// Presence of any of these means we are running unattended
    pub const CI_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "JENKINS_URL", "BUILDKITE"];
}

/// UI and formatting constants
pub mod ui {
    /// Appended to label lists the server returned incomplete
    pub const TRUNCATION_MARKER: &str = "…";
}

/// Recency ranking: score is visits times the weight of the newest bracket
/// the last visit falls into
pub mod frecency {
    /// (max age in days, weight), youngest first
    pub const AGE_WEIGHTS: &[(i64, u64)] = &[(4, 100), (14, 70), (31, 50), (90, 30)];
    pub const OLDEST_WEIGHT: u64 = 10;
}
