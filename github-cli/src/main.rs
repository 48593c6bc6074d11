// ABOUTME: Main entry point for the GitHub CLI application
// ABOUTME: Wires configuration, the GraphQL client, and local state into the issue workflows

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use github_sdk::constants::urls::graphql_endpoint;
use github_sdk::{GitHubClient, GitHubError};
use secrecy::SecretString;
use std::borrow::Cow;
use std::io::IsTerminal;
use std::path::PathBuf;

use github_cli::browser::SystemBrowser;
use github_cli::cli::{Cli, Commands, IssueCommand};
use github_cli::cli_output::CliOutput;
use github_cli::completions::generate_completions;
use github_cli::config::Config;
use github_cli::constants::{env, files};
use github_cli::context::{self, Session};
use github_cli::error::IssueCommandError;
use github_cli::issue::{
    self, CloseOutcome, CreateOptions, CreateOutcome, ListOptions, ListOutcome, ViewOutcome,
};
use github_cli::output::{IssueTable, issue_preview};
use github_cli::prompt::DialoguerPrompter;
use github_cli::recency::FileRecencyStore;
use github_cli::templates::find_templates;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = CliOutput::with_color(context::use_color(cli.no_color));
    if let Err(err) = run(cli, output).await {
        report_error(&output, &err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn report_error(output: &CliOutput, err: &anyhow::Error) {
    output.error(&format!("{err:#}"));

    let hint = err
        .downcast_ref::<IssueCommandError>()
        .and_then(IssueCommandError::help_text)
        .or_else(|| {
            err.downcast_ref::<GitHubError>()
                .and_then(GitHubError::help_text)
        });
    if let Some(hint) = hint {
        output.hint(hint);
    }
}

fn read_token() -> Result<SecretString, GitHubError> {
    env::TOKEN_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|token| !token.is_empty())
        .map(|token| SecretString::new(token.into_boxed_str()))
        .ok_or_else(|| GitHubError::Auth {
            reason: Cow::Borrowed("no token found in GH_TOKEN or GITHUB_TOKEN"),
            source: None,
        })
}

fn build_client(config: &Config, host: &str, verbose: bool) -> Result<GitHubClient> {
    let endpoint = config
        .api_url
        .clone()
        .unwrap_or_else(|| graphql_endpoint(host));

    let client = GitHubClient::builder()
        .auth_token(read_token()?)
        .base_url(Some(endpoint))
        .verbose(verbose)
        .build()?;
    Ok(client)
}

/// Template files of the current checkout; none outside a git repository
fn discover_templates() -> Vec<PathBuf> {
    context::git_toplevel()
        .map(|root| find_templates(&root, files::ISSUE_TEMPLATE))
        .unwrap_or_default()
}

async fn run(cli: Cli, output: CliOutput) -> Result<()> {
    let command = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate_completions(shell, &mut cmd, &mut std::io::stdout());
            return Ok(());
        }
        Commands::Issue(command) => command,
    };

    let config = Config::load()?;
    config.validate()?;

    let host = context::resolve_host(&config);
    let repo = context::resolve_repo(cli.repo.as_deref(), &config, &host)?;
    let session = Session {
        repo,
        can_prompt: context::can_prompt(&config),
        stdout_tty: std::io::stdout().is_terminal(),
        color: output.use_color(),
    };
    log::debug!("Base repository: {}", session.repo);

    let recency_path = config
        .recency_path()
        .context("Could not determine where to keep recent issues; set recency_file in config")?;
    let recency = FileRecencyStore::new(recency_path);
    let prompter = DialoguerPrompter::new(config.editor.clone());
    let browser = SystemBrowser;

    match command {
        IssueCommand::Create { title, body, web } => {
            output.notice(&format!("\nCreating issue in {}\n", session.repo));
            let template_paths = discover_templates();

            let outcome = if web {
                issue::open_new_issue_page(&browser, &session.repo, &template_paths)?
            } else {
                let client = build_client(&config, &host, cli.verbose)?;
                let opts = CreateOptions { title, body, web };
                issue::create_issue(
                    &client,
                    &recency,
                    &prompter,
                    &browser,
                    &session,
                    &template_paths,
                    &opts,
                )
                .await?
            };

            if let Some(message) = outcome.message() {
                output.notice(&message);
            }
            if let CreateOutcome::Created { url, .. } = outcome {
                println!("{url}");
            }
        }
        IssueCommand::Close { selector } => {
            issue::ensure_selector_or_prompt(selector.as_deref(), &session)?;
            let client = build_client(&config, &host, cli.verbose)?;
            let outcome =
                issue::close_issue(&client, &recency, &prompter, &session, selector.as_deref())
                    .await?;

            if let Some(message) = outcome.message() {
                match outcome {
                    CloseOutcome::Closed { .. } => output.success(&message),
                    CloseOutcome::AlreadyClosed { .. } => output.attention(&message),
                    CloseOutcome::NoRecentIssues | CloseOutcome::Cancelled => {
                        output.notice(&message)
                    }
                }
            }
        }
        IssueCommand::List {
            assignee,
            label,
            state,
            limit,
        } => {
            let client = build_client(&config, &host, cli.verbose)?;
            let opts = ListOptions {
                assignee,
                labels: label,
                state: state.map(Into::into),
                limit: limit.map(|l| l as usize),
            };

            output.notice(&format!("\nIssues for {}\n", session.repo));
            let spinner = output.spinner("Fetching issues...");
            let result = issue::list_issues(&client, &session.repo, &opts).await;
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }

            match result? {
                ListOutcome::Issues(issues) => {
                    let table = IssueTable::new(session.stdout_tty, session.color);
                    print!("{}", table.render(&issues));
                    if session.stdout_tty {
                        println!();
                    }
                }
                empty => {
                    if let Some(message) = empty.empty_message() {
                        output.notice(message);
                    }
                }
            }
        }
        IssueCommand::Status => {
            let client = build_client(&config, &host, cli.verbose)?;

            let spinner = output.spinner("Fetching issue status...");
            let result = issue::fetch_status(&client, &session.repo).await;
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
            let payload = result?;

            println!("\nRelevant issues in {}\n", session.repo);
            print!(
                "{}",
                issue::render_status(&payload, chrono::Utc::now(), session.color)
            );
        }
        IssueCommand::View { selector, preview } => {
            let client = build_client(&config, &host, cli.verbose)?;

            let spinner = output.spinner("Fetching issue...");
            let result =
                issue::view_issue(&client, &recency, &browser, &session, &selector, preview).await;
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }

            match result? {
                ViewOutcome::OpenedInBrowser { url } => {
                    output.notice(&format!("Opening {url} in your browser."));
                }
                ViewOutcome::Preview(issue) => {
                    print!("{}", issue_preview(&issue, session.color));
                }
            }
        }
    }

    Ok(())
}
