// ABOUTME: Detects the base repository, host, and terminal capabilities for a command run
// ABOUTME: Reads flags, environment, config, and the git checkout in precedence order

use anyhow::{Context, Result, anyhow};
use github_sdk::Repo;
use github_sdk::constants::urls::DEFAULT_HOST;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::Command;

use crate::config::Config;
use crate::constants::env;

/// scp-style SSH remotes: `git@github.com:acme/widgets.git`
static SCP_REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[^@/]+@)?([^:/]+):([^/]+)/([^/]+?)(?:\.git)?/?$").expect("valid regex")
});

/// Everything a workflow needs to know about where and how it runs
#[derive(Debug, Clone)]
pub struct Session {
    pub repo: Repo,
    /// Interactive prompts are allowed
    pub can_prompt: bool,
    /// Standard output is a terminal
    pub stdout_tty: bool,
    pub color: bool,
}

/// Running under a CI system
pub fn is_in_ci() -> bool {
    env::CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

/// Prompts need a terminal on both ends, no CI, and no config opt-out
pub fn can_prompt(config: &Config) -> bool {
    std::io::stdin().is_terminal()
        && std::io::stdout().is_terminal()
        && !is_in_ci()
        && config.prompt_enabled()
}

/// Web host: `GH_HOST`, then config, then github.com
pub fn resolve_host(config: &Config) -> String {
    std::env::var(env::HOST)
        .ok()
        .filter(|h| !h.is_empty())
        .or_else(|| config.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

/// Base repository from the first source that names one
pub fn resolve_repo_from(
    flag: Option<&str>,
    env_repo: Option<String>,
    config_repo: Option<&str>,
    remote_url: impl FnOnce() -> Option<String>,
    host: &str,
) -> Result<Repo> {
    if let Some(flag) = flag {
        return Repo::parse_with_host(flag, host)
            .with_context(|| format!("Invalid --repo value '{flag}'"));
    }

    if let Some(env_repo) = env_repo.filter(|r| !r.is_empty()) {
        return Repo::parse_with_host(&env_repo, host)
            .with_context(|| format!("Invalid {} value '{env_repo}'", env::REPO));
    }

    if let Some(config_repo) = config_repo {
        return Repo::parse_with_host(config_repo, host)
            .with_context(|| format!("Invalid default_repo '{config_repo}'"));
    }

    remote_url()
        .and_then(|url| parse_remote_url(&url))
        .ok_or_else(|| {
            anyhow!(
                "could not determine base repository. Run inside a git checkout or pass --repo OWNER/REPO"
            )
        })
}

pub fn resolve_repo(flag: Option<&str>, config: &Config, host: &str) -> Result<Repo> {
    resolve_repo_from(
        flag,
        std::env::var(env::REPO).ok(),
        config.default_repo.as_deref(),
        git_remote_url,
        host,
    )
}

/// Parse an HTTPS, `ssh://` or scp-style git remote
pub fn parse_remote_url(remote: &str) -> Option<Repo> {
    let remote = remote.trim();

    if let Some(url) = url::Url::parse(remote).ok().filter(|url| url.has_host()) {
        let host = url.host_str()?;
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let name = segments.next()?.trim_end_matches(".git");
        if name.is_empty() {
            return None;
        }
        return Some(Repo::with_host(host, owner, name));
    }

    let captures = SCP_REMOTE_RE.captures(remote)?;
    Some(Repo::with_host(&captures[1], &captures[2], &captures[3]))
}

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        log::debug!("git {} failed", args.join(" "));
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// URL of `origin`, or of the first remote when there is no origin
pub fn git_remote_url() -> Option<String> {
    git_output(&["remote", "get-url", "origin"]).or_else(|| {
        let remotes = git_output(&["remote"])?;
        let first = remotes.lines().next()?;
        git_output(&["remote", "get-url", first])
    })
}

/// Top-level directory of the current git checkout
pub fn git_toplevel() -> Option<PathBuf> {
    git_output(&["rev-parse", "--show-toplevel"]).map(PathBuf::from)
}

/// Color unless disabled by flag, `NO_COLOR`, a dumb terminal, or a pipe
pub fn use_color(no_color_flag: bool) -> bool {
    !no_color_flag
        && std::env::var_os(env::NO_COLOR).is_none()
        && std::env::var("TERM").unwrap_or_default() != "dumb"
        && std::io::stdout().is_terminal()
}
