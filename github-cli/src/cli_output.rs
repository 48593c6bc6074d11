// ABOUTME: Centralized CLI output utilities for consistent user-facing messages on stderr
// ABOUTME: Provides error/warning/notice/success lines and a spinner for remote calls

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

use crate::constants::timeouts::PROGRESS_BAR_TICK_MS;

/// Centralized CLI output utilities for consistent formatting
#[derive(Debug, Clone, Copy)]
pub struct CliOutput {
    use_color: bool,
    interactive: bool,
}

impl CliOutput {
    /// Create new CLI output utility with TTY detection
    pub fn new() -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self {
            use_color: is_tty,
            interactive: is_tty,
        }
    }

    /// Create CLI output utility with explicit color setting
    pub fn with_color(use_color: bool) -> Self {
        Self {
            use_color,
            interactive: std::io::stderr().is_terminal(),
        }
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Display an error message
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "error:".red().bold(), message);
        } else {
            eprintln!("error: {}", message);
        }
    }

    /// Display a warning message
    pub fn warning(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        } else {
            eprintln!("warning: {}", message);
        }
    }

    /// Plain informational line, e.g. empty-state messages
    pub fn notice(&self, message: &str) {
        eprintln!("{}", message);
    }

    /// `!`-prefixed line for expected outcomes that need attention
    pub fn attention(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "!".yellow(), message);
        } else {
            eprintln!("! {}", message);
        }
    }

    /// `✓`-prefixed line for completed actions
    pub fn success(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "✓".red(), message);
        } else {
            eprintln!("✓ {}", message);
        }
    }

    /// Dimmed hint shown under an error
    pub fn hint(&self, message: &str) {
        if self.use_color {
            eprintln!("{}", message.dimmed());
        } else {
            eprintln!("{}", message);
        }
    }

    /// Spinner on stderr while waiting on the network; `None` when not a terminal
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.interactive {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(PROGRESS_BAR_TICK_MS));
        Some(pb)
    }
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}
