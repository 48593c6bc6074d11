// ABOUTME: This module handles output formatting for issue lists, status sections, and previews
// ABOUTME: It provides label lists, relative times, and table rendering with color support

use chrono::{DateTime, Utc};
use github_sdk::{Issue, IssueConnection, IssueState};
use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use regex::Regex;
use tabled::settings::object::Rows;
use tabled::settings::{Remove, Style};
use tabled::{Table, Tabled};

use crate::constants::limits::STATUS_TITLE_WIDTH;
use crate::constants::ui::TRUNCATION_MARKER;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse runs of whitespace (including newlines) into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Cut `text` to `max` characters, ending with `...` when shortened
pub fn truncate(max: usize, text: &str) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// `1 comment`, `2 comments`
pub fn pluralize(count: usize, thing: &str) -> String {
    if count == 1 {
        format!("{count} {thing}")
    } else {
        format!("{count} {thing}s")
    }
}

/// Human-friendly distance into the past
pub fn fuzzy_ago(ago: chrono::Duration) -> String {
    let about = |amount: i64, unit: &str| {
        format!("about {} ago", pluralize(amount.max(0) as usize, unit))
    };

    if ago < chrono::Duration::minutes(1) {
        "less than a minute ago".to_string()
    } else if ago < chrono::Duration::hours(1) {
        about(ago.num_minutes(), "minute")
    } else if ago < chrono::Duration::days(1) {
        about(ago.num_hours(), "hour")
    } else if ago < chrono::Duration::days(30) {
        about(ago.num_days(), "day")
    } else if ago < chrono::Duration::days(365) {
        about(ago.num_days() / 30, "month")
    } else {
        about(ago.num_days() / 365, "year")
    }
}

/// Comma-separated label names; incomplete lists end with a truncation marker
pub fn label_list(issue: &Issue) -> String {
    if issue.labels.nodes.is_empty() {
        return String::new();
    }

    let mut list = issue.labels.names().collect::<Vec<_>>().join(", ");
    if issue.labels.is_truncated() {
        list.push_str(", ");
        list.push_str(TRUNCATION_MARKER);
    }
    list
}

fn colored_number(issue: &Issue, text: String, use_color: bool) -> String {
    if !use_color {
        return text;
    }
    match issue.state {
        IssueState::Open => text.green().to_string(),
        IssueState::Closed => text.red().to_string(),
        IssueState::Merged => text.magenta().to_string(),
    }
}

fn gray(text: &str, use_color: bool) -> String {
    if use_color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Labels")]
    labels: String,
}

/// Renders `issue list` output
pub struct IssueTable {
    is_tty: bool,
    use_color: bool,
}

impl IssueTable {
    pub fn new(is_tty: bool, use_color: bool) -> Self {
        Self { is_tty, use_color }
    }

    /// Terminal output is an aligned table; piped output is tab-separated
    pub fn render(&self, issues: &[Issue]) -> String {
        if !self.is_tty {
            return issues
                .iter()
                .map(|issue| {
                    format!(
                        "{}\t{}\t{}\n",
                        issue.number,
                        collapse_whitespace(&issue.title),
                        label_list(issue)
                    )
                })
                .collect();
        }

        let rows: Vec<IssueRow> = issues
            .iter()
            .map(|issue| {
                let labels = label_list(issue);
                IssueRow {
                    number: colored_number(issue, format!("#{}", issue.number), self.use_color),
                    title: collapse_whitespace(&issue.title),
                    labels: if labels.is_empty() {
                        labels
                    } else {
                        gray(&format!("({labels})"), self.use_color)
                    },
                }
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::blank()).with(Remove::row(Rows::first()));
        table.to_string()
    }
}

/// One section of `issue status`: header, entries, and overflow line
pub fn status_section(
    header: &str,
    empty_message: &str,
    connection: &IssueConnection,
    now: DateTime<Utc>,
    use_color: bool,
) -> String {
    let mut out = String::new();
    if use_color {
        out.push_str(&header.bold().to_string());
    } else {
        out.push_str(header);
    }
    out.push('\n');

    if connection.total_count == 0 {
        out.push_str(&format!("  {}\n", gray(empty_message, use_color)));
        return out;
    }

    for issue in &connection.issues {
        let number = colored_number(issue, format!("#{}", issue.number), use_color);
        let title = truncate(STATUS_TITLE_WIDTH, &collapse_whitespace(&issue.title));
        let labels = label_list(issue);
        let labels = if labels.is_empty() {
            labels
        } else {
            gray(&format!("  ({labels})"), use_color)
        };
        let ago = issue
            .updated_at
            .map(|updated| format!(" {}", gray(&fuzzy_ago(now - updated), use_color)))
            .unwrap_or_default();

        out.push_str(&format!("  {number} {title}{labels}{ago}\n"));
    }

    let remaining = connection.total_count.saturating_sub(connection.issues.len());
    if remaining > 0 {
        out.push_str(&format!(
            "  {}\n",
            gray(&format!("And {remaining} more"), use_color)
        ));
    }
    out
}

/// Full preview printed by `issue view --preview`
pub fn issue_preview(issue: &Issue, use_color: bool) -> String {
    let labels = label_list(issue);
    let labels = if labels.is_empty() {
        labels
    } else {
        format!("({labels})")
    };
    let title = if use_color {
        issue.title.bold().to_string()
    } else {
        issue.title.clone()
    };
    let byline = format!(
        "opened by {}. {}. {}",
        issue.author_login(),
        pluralize(issue.comments.total_count, "comment"),
        labels
    );
    let footer = format!(
        "View this issue on GitHub: {}",
        issue.url.as_deref().unwrap_or_default()
    );

    format!(
        "{title}\n{}\n\n{}\n\n{}\n",
        gray(byline.trim_end(), use_color),
        issue.body.as_deref().unwrap_or_default().trim_end(),
        gray(&footer, use_color)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use github_sdk::{Author, Comments, Label, Labels};

    fn labels(names: &[&str], total: usize) -> Labels {
        Labels {
            nodes: names
                .iter()
                .map(|n| Label {
                    name: n.to_string(),
                })
                .collect(),
            total_count: total,
        }
    }

    fn issue(number: u64, title: &str, names: &[&str], total: usize) -> Issue {
        Issue {
            number,
            title: title.to_string(),
            labels: labels(names, total),
            ..Default::default()
        }
    }

    #[test]
    fn test_label_list() {
        assert_eq!(label_list(&issue(1, "t", &[], 0)), "");
        assert_eq!(label_list(&issue(1, "t", &["bug", "ui"], 2)), "bug, ui");
        assert_eq!(
            label_list(&issue(1, "t", &["bug", "ui", "p1"], 5)),
            "bug, ui, p1, …"
        );
    }

    #[test]
    fn test_collapse_whitespace_and_truncate() {
        assert_eq!(collapse_whitespace("  a\n\tb   c "), "a b c");
        assert_eq!(truncate(10, "short"), "short");
        assert_eq!(truncate(10, "exactly 10"), "exactly 10");
        assert_eq!(truncate(10, "this is far too long"), "this is...");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "comment"), "0 comments");
        assert_eq!(pluralize(1, "comment"), "1 comment");
        assert_eq!(pluralize(3, "comment"), "3 comments");
    }

    #[test]
    fn test_fuzzy_ago() {
        assert_eq!(fuzzy_ago(Duration::seconds(30)), "less than a minute ago");
        assert_eq!(fuzzy_ago(Duration::minutes(1)), "about 1 minute ago");
        assert_eq!(fuzzy_ago(Duration::minutes(45)), "about 45 minutes ago");
        assert_eq!(fuzzy_ago(Duration::hours(5)), "about 5 hours ago");
        assert_eq!(fuzzy_ago(Duration::days(3)), "about 3 days ago");
        assert_eq!(fuzzy_ago(Duration::days(65)), "about 2 months ago");
        assert_eq!(fuzzy_ago(Duration::days(800)), "about 2 years ago");
    }

    #[test]
    fn test_plain_table_is_tab_separated() {
        let table = IssueTable::new(false, false);
        let out = table.render(&[
            issue(12, "Crash\non startup", &["bug"], 1),
            issue(9, "Docs typo", &[], 0),
        ]);

        assert_eq!(out, "12\tCrash on startup\tbug\n9\tDocs typo\t\n");
    }

    #[test]
    fn test_tty_table_marks_numbers() {
        let table = IssueTable::new(true, false);
        let out = table.render(&[issue(12, "Crash on startup", &["bug"], 1)]);

        assert!(out.contains("#12"));
        assert!(out.contains("Crash on startup"));
        assert!(out.contains("(bug)"));
    }

    #[test]
    fn test_tty_table_has_no_header_row() {
        let table = IssueTable::new(true, false);
        let out = table.render(&[
            issue(12, "Crash on startup", &["bug"], 1),
            issue(9, "Docs typo", &[], 2),
        ]);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].trim_start().starts_with("#12"));
        assert!(lines[1].trim_start().starts_with("#9"));
        assert!(!out.contains("Number"));
        assert!(!out.contains("Title"));
        assert!(!out.contains("Labels"));
    }

    #[test]
    fn test_status_section() {
        let now = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
        let mut first = issue(12, "Crash on startup", &["bug"], 1);
        first.updated_at = Some(now - Duration::hours(2));
        let connection = IssueConnection {
            total_count: 3,
            issues: vec![first],
        };

        let out = status_section(
            "Issues assigned to you",
            "There are no issues assigned to you",
            &connection,
            now,
            false,
        );

        insta::assert_snapshot!(out, @r"
        Issues assigned to you
          #12 Crash on startup  (bug) about 2 hours ago
          And 2 more
        ");
    }

    #[test]
    fn test_empty_status_section() {
        let out = status_section(
            "Issues mentioning you",
            "There are no issues mentioning you",
            &IssueConnection::default(),
            Utc::now(),
            false,
        );

        assert_eq!(
            out,
            "Issues mentioning you\n  There are no issues mentioning you\n"
        );
    }

    #[test]
    fn test_issue_preview() {
        let preview = issue_preview(
            &Issue {
                number: 42,
                title: "Widgets fall over".to_string(),
                body: Some("They tip when loaded.".to_string()),
                url: Some("https://github.com/acme/widgets/issues/42".to_string()),
                author: Some(Author {
                    login: "hubot".to_string(),
                }),
                comments: Comments { total_count: 1 },
                labels: labels(&["bug"], 1),
                ..Default::default()
            },
            false,
        );

        insta::assert_snapshot!(preview, @r"
        Widgets fall over
        opened by hubot. 1 comment. (bug)

        They tip when loaded.

        View this issue on GitHub: https://github.com/acme/widgets/issues/42
        ");
    }
}
