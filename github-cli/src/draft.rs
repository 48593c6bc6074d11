// ABOUTME: Merges flag-supplied title and body with interactively collected values
// ABOUTME: The prompter is the only side effect; flag values always take precedence

use crate::error::IssueCommandError;
use crate::prompt::{Action, Prompter, TitleBody};
use crate::templates::Template;

/// Prompting is needed unless both title and body came from flags
pub fn needs_prompt(title: &str, body: &str) -> bool {
    title.is_empty() || body.is_empty()
}

/// Final draft for the create workflow.
///
/// With both values supplied the draft is submitted as is. Otherwise the
/// prompter fills the gaps, seeded with what we have, and chooses the action.
pub fn collect_title_body(
    title: &str,
    body: &str,
    templates: &[Template],
    prompter: &dyn Prompter,
) -> Result<TitleBody, IssueCommandError> {
    if !needs_prompt(title, body) {
        return Ok(TitleBody {
            title: title.to_string(),
            body: body.to_string(),
            action: Action::Submit,
        });
    }

    let collected = prompter.collect_title_body(title, body, templates)?;
    let pick = |flag: &str, prompted: String| {
        if flag.is_empty() {
            prompted
        } else {
            flag.to_string()
        }
    };

    Ok(TitleBody {
        title: pick(title, collected.title),
        body: pick(body, collected.body),
        action: collected.action,
    })
}
