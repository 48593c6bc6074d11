// ABOUTME: Launches URLs in the user's web browser
// ABOUTME: Workflows go through the Browser trait so tests can record URLs instead

use crate::error::IssueCommandError;

pub trait Browser {
    fn open(&self, url: &str) -> Result<(), IssueCommandError>;
}

/// Opens URLs with the platform's default handler without waiting for it to exit
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), IssueCommandError> {
        log::debug!("Opening {url}");
        open::that_detached(url).map_err(IssueCommandError::Browser)
    }
}
