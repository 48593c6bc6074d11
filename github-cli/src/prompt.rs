// ABOUTME: Interactive prompts for drafting issues and picking from lists
// ABOUTME: The Prompter trait lets workflows run against dialoguer or a scripted fake

use dialoguer::{Editor, Input, Select};

use crate::error::IssueCommandError;
use crate::templates::Template;

/// What to do with a drafted issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    Preview,
    Cancel,
}

impl Action {
    /// Choices of the "What's next?" menu, in menu order
    pub const MENU: [&'static str; 3] = ["Preview in browser", "Submit", "Cancel"];

    /// Map a menu index onto an action; any other index is a bug
    pub fn from_menu_index(index: usize) -> Action {
        match index {
            0 => Action::Preview,
            1 => Action::Submit,
            2 => Action::Cancel,
            _ => unreachable!("no action at menu index {index}"),
        }
    }
}

/// Draft produced by interactive collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleBody {
    pub title: String,
    pub body: String,
    pub action: Action,
}

pub trait Prompter {
    /// Ask for whichever of title and body is missing, then for the action
    fn collect_title_body(
        &self,
        seed_title: &str,
        seed_body: &str,
        templates: &[Template],
    ) -> Result<TitleBody, IssueCommandError>;

    /// Single choice from `items`; `None` when the user backs out
    fn select_one(&self, prompt: &str, items: &[String])
    -> Result<Option<usize>, IssueCommandError>;
}

/// Terminal prompts backed by dialoguer
#[derive(Debug, Default)]
pub struct DialoguerPrompter {
    editor: Option<String>,
}

impl DialoguerPrompter {
    pub fn new(editor: Option<String>) -> Self {
        Self { editor }
    }

    fn prompt_template(&self, templates: &[Template]) -> Result<String, IssueCommandError> {
        if templates.is_empty() {
            return Ok(String::new());
        }

        let mut names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        names.push("Open a blank issue");

        let selection = Select::new()
            .with_prompt("Choose a template")
            .items(&names)
            .default(0)
            .interact()?;

        Ok(templates
            .get(selection)
            .map(|t| t.body.clone())
            .unwrap_or_default())
    }

    fn prompt_title(&self) -> Result<String, IssueCommandError> {
        let title: String = Input::new()
            .with_prompt("Title")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Title cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        Ok(title.trim().to_string())
    }

    fn prompt_body(&self, template_body: &str) -> Result<String, IssueCommandError> {
        let mut editor = Editor::new();
        editor.extension(".md");
        if let Some(ref executable) = self.editor {
            editor.executable(executable);
        }

        // An editor closed without saving keeps the template text
        let body = editor
            .edit(template_body)
            .map_err(dialoguer::Error::from)?
            .unwrap_or_else(|| template_body.to_string());

        Ok(body)
    }

    fn prompt_action(&self) -> Result<Action, IssueCommandError> {
        let selection = Select::new()
            .with_prompt("What's next?")
            .items(&Action::MENU)
            .default(1)
            .interact_opt()?;

        Ok(selection.map_or(Action::Cancel, Action::from_menu_index))
    }
}

impl Prompter for DialoguerPrompter {
    fn collect_title_body(
        &self,
        seed_title: &str,
        seed_body: &str,
        templates: &[Template],
    ) -> Result<TitleBody, IssueCommandError> {
        let title = if seed_title.is_empty() {
            self.prompt_title()?
        } else {
            seed_title.to_string()
        };

        let body = if seed_body.is_empty() {
            let template_body = self.prompt_template(templates)?;
            self.prompt_body(&template_body)?
        } else {
            seed_body.to_string()
        };

        let action = self.prompt_action()?;

        Ok(TitleBody {
            title,
            body,
            action,
        })
    }

    fn select_one(
        &self,
        prompt: &str,
        items: &[String],
    ) -> Result<Option<usize>, IssueCommandError> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()?)
    }
}
