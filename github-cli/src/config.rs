// ABOUTME: Configuration file loading, validation, and hierarchical merging for the GitHub CLI
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::constants::files;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    /// Web host of the GitHub instance, e.g. `github.com`
    #[serde(default)]
    pub host: Option<String>,
    /// GraphQL endpoint override
    #[serde(default)]
    pub api_url: Option<String>,
    /// Repository used when none is given and none is detected from git
    #[serde(default)]
    pub default_repo: Option<String>,
    #[serde(default, deserialize_with = "validate_prompt")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    pub recency_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let mut paths = Self::get_config_paths();
        // Highest precedence must be applied last
        paths.reverse();
        Self::load_from_paths(&paths.iter().map(|p| p.as_str()).collect::<Vec<_>>())
    }

    /// Load configuration from file paths, lowest precedence first.
    /// Missing files are skipped; malformed ones are reported.
    pub fn load_from_paths(paths: &[&str]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !Path::new(path).exists() {
                continue;
            }
            let file_config = Self::load_from_file(path)?;
            config = config.merge(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get standard config file paths in order of precedence (highest first)
    pub fn get_config_paths() -> Vec<String> {
        let mut paths = Vec::new();

        // 1. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(
                current_dir
                    .join(files::PROJECT_CONFIG_FILE)
                    .to_string_lossy()
                    .to_string(),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home)
                .join(files::CONFIG_DIR_NAME)
                .join(files::CONFIG_FILE);
            paths.push(path.to_string_lossy().to_string());
        }

        // 3. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir
                .join(".config")
                .join(files::CONFIG_DIR_NAME)
                .join(files::CONFIG_FILE);
            paths.push(path.to_string_lossy().to_string());
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            host: other.host.or(self.host),
            api_url: other.api_url.or(self.api_url),
            default_repo: other.default_repo.or(self.default_repo),
            prompt: other.prompt.or(self.prompt),
            editor: other.editor.or(self.editor),
            recency_file: other.recency_file.or(self.recency_file),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(host) = self
            .host
            .as_ref()
            .filter(|host| host.is_empty() || host.contains('/'))
        {
            return Err(anyhow!(
                "Invalid host '{}'. Expected a bare host name such as github.com",
                host
            ));
        }

        if let Some(ref repo) = self.default_repo {
            repo.parse::<github_sdk::Repo>()
                .with_context(|| format!("Invalid default_repo '{repo}'"))?;
        }

        Ok(())
    }

    /// Whether the config allows interactive prompts
    pub fn prompt_enabled(&self) -> bool {
        self.prompt.as_deref() != Some("disabled")
    }

    /// Location of the recent-issues file
    pub fn recency_path(&self) -> Option<PathBuf> {
        self.recency_file.clone().or_else(|| {
            std::env::var_os("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
                .map(|dir| dir.join(files::CONFIG_DIR_NAME).join(files::RECENCY_FILE))
        })
    }
}

// Custom deserializer for prompt validation
fn validate_prompt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;

    match value.as_deref() {
        None | Some("enabled") | Some("disabled") => Ok(value),
        Some(other) => Err(D::Error::custom(format!(
            "Invalid prompt setting '{}'. Must be one of: enabled, disabled",
            other
        ))),
    }
}
