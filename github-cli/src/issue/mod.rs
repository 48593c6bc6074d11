// ABOUTME: The `gh issue` workflows: create, close, list, status, and view
// ABOUTME: Each workflow takes its collaborators as traits and returns an outcome for main to report

pub mod close;
pub mod create;
pub mod list;
pub mod status;
pub mod view;

pub use close::{CloseOutcome, close_issue, ensure_selector_or_prompt};
pub use create::{CreateOptions, CreateOutcome, create_issue, open_new_issue_page};
pub use list::{ListOptions, ListOutcome, list_issues};
pub use status::{fetch_status, render_status};
pub use view::{ViewOutcome, view_issue};
