// ABOUTME: CLI argument definitions for the GitHub CLI application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand, ValueEnum};
use github_sdk::IssueStateFilter;

#[derive(Parser, Debug)]
#[command(name = "gh")]
#[command(about = "Work with GitHub issues from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Select another repository using the [HOST/]OWNER/REPO format
    #[arg(short = 'R', long, global = true, value_name = "[HOST/]OWNER/REPO")]
    pub repo: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create and view issues
    #[command(
        subcommand,
        long_about = "Work with GitHub issues.

An issue can be supplied as argument in any of the following formats:
- by number, e.g. \"123\"; or
- by URL, e.g. \"https://github.com/OWNER/REPO/issues/123\"."
    )]
    Issue(IssueCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: crate::completions::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum IssueCommand {
    /// Create a new issue
    Create {
        /// Supply a title. Will prompt for one otherwise.
        #[arg(short, long, default_value = "")]
        title: String,

        /// Supply a body. Will prompt for one otherwise.
        #[arg(short, long, default_value = "")]
        body: String,

        /// Open the browser to create an issue
        #[arg(short, long)]
        web: bool,
    },
    /// Close an issue
    Close {
        /// Issue number or URL; prompts with recent issues when omitted
        selector: Option<String>,
    },
    /// List and filter issues in this repository
    List {
        /// Filter by assignee
        #[arg(short, long)]
        assignee: Option<String>,

        /// Filter by label
        #[arg(short, long, value_delimiter = ',')]
        label: Vec<String>,

        /// Filter by state
        #[arg(short, long, value_enum)]
        state: Option<StateArg>,

        /// Maximum number of issues to fetch
        #[arg(short = 'L', long, value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,
    },
    /// Show status of relevant issues
    Status,
    /// View an issue in the browser
    View {
        /// Issue number or URL
        selector: String,

        /// Display preview of issue content
        #[arg(short, long)]
        preview: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Open,
    Closed,
    All,
}

impl From<StateArg> for IssueStateFilter {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Open => IssueStateFilter::Open,
            StateArg::Closed => IssueStateFilter::Closed,
            StateArg::All => IssueStateFilter::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "gh");

        let issue = cli
            .find_subcommand("issue")
            .expect("issue command should exist");
        for name in ["create", "close", "list", "status", "view"] {
            assert!(issue.find_subcommand(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_parse_create_flags() {
        let cli = Cli::try_parse_from([
            "gh", "issue", "create", "-t", "Title", "-b", "Body", "-R", "acme/widgets",
        ])
        .unwrap();

        assert_eq!(cli.repo.as_deref(), Some("acme/widgets"));
        match cli.command {
            Commands::Issue(IssueCommand::Create { title, body, web }) => {
                assert_eq!(title, "Title");
                assert_eq!(body, "Body");
                assert!(!web);
            }
            other => panic!("Expected create command, got {other:?}"),
        }
    }

    #[test]
    fn test_create_defaults_to_empty_strings() {
        let cli = Cli::try_parse_from(["gh", "issue", "create"]).unwrap();
        match cli.command {
            Commands::Issue(IssueCommand::Create { title, body, .. }) => {
                assert!(title.is_empty());
                assert!(body.is_empty());
            }
            other => panic!("Expected create command, got {other:?}"),
        }
    }

    #[test]
    fn test_close_selector_is_optional() {
        let cli = Cli::try_parse_from(["gh", "issue", "close"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Issue(IssueCommand::Close { selector: None })
        ));
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "gh", "issue", "list", "-l", "bug", "-l", "ui,p1", "-s", "closed", "-L", "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Issue(IssueCommand::List {
                label,
                state,
                limit,
                assignee,
            }) => {
                assert_eq!(label, vec!["bug", "ui", "p1"]);
                assert_eq!(state, Some(StateArg::Closed));
                assert_eq!(limit, Some(5));
                assert_eq!(assignee, None);
            }
            other => panic!("Expected list command, got {other:?}"),
        }
    }

    #[test]
    fn test_list_limit_must_be_positive() {
        assert!(Cli::try_parse_from(["gh", "issue", "list", "-L", "0"]).is_err());
    }

    #[test]
    fn test_view_requires_selector() {
        assert!(Cli::try_parse_from(["gh", "issue", "view"]).is_err());
    }
}
