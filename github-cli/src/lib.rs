// ABOUTME: Library exports for GitHub CLI modules for testing and external use
// ABOUTME: Makes the issue workflows and their collaborators available to integration tests

pub mod browser;
pub mod cli;
pub mod cli_output;
pub mod completions;
pub mod config;
pub mod constants;
pub mod context;
pub mod draft;
pub mod error;
pub mod issue;
pub mod output;
pub mod prompt;
pub mod recency;
pub mod resolver;
pub mod templates;
