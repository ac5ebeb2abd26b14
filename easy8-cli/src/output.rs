// ABOUTME: This module handles output formatting for the Easy8 CLI
// ABOUTME: It provides table formatting with color support and a JSON formatter

use anyhow::Result;
use easy8_sdk::{Issue, IssueListResponse, LookupItem, SearchResponse, User};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;
use std::io::IsTerminal;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::OutputArgs;
use crate::constants::ui;

pub trait OutputFormat {
    fn format_issues(&self, issues: &[Issue]) -> Result<String>;

    fn format_issue_list(&self, response: &IssueListResponse) -> Result<String> {
        self.format_issues(&response.issues)
    }

    /// A created or updated issue; `None` when the server sent no body.
    fn format_saved_issue(&self, id: Option<u32>, issue: Option<&Issue>) -> Result<String>;

    fn format_search(&self, response: &SearchResponse) -> Result<String>;

    fn format_lookup_items(&self, items: &[LookupItem]) -> Result<String>;

    fn format_users(&self, users: &[User]) -> Result<String>;
}

/// Pick the formatter requested on the command line.
pub fn formatter(args: &OutputArgs, use_color: bool) -> Box<dyn OutputFormat> {
    if args.json {
        Box::new(JsonFormatter::new(args.pretty))
    } else {
        Box::new(TableFormatter::new(use_color))
    }
}

/// Decide whether stdout output should be colored.
pub fn use_color(no_color: bool, force_color: bool) -> bool {
    color_enabled(
        no_color,
        force_color,
        |key| std::env::var_os(key).is_some(),
        std::env::var("TERM").ok().as_deref(),
        std::io::stdout().is_terminal(),
    )
}

fn color_enabled(
    no_color: bool,
    force_color: bool,
    env_set: impl Fn(&str) -> bool,
    term: Option<&str>,
    is_terminal: bool,
) -> bool {
    if force_color {
        return true;
    }
    !no_color && !env_set("NO_COLOR") && term != Some("dumb") && is_terminal
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn truncate(text: &str, max_len: usize) -> String {
        if text.chars().count() <= max_len {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
            format!("{kept}...")
        }
    }

    fn format_ref(&self, name: Option<&str>, missing: &str) -> String {
        match name.filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None if self.use_color => missing.dimmed().to_string(),
            None => missing.to_string(),
        }
    }

    fn format_id(&self, id: u32) -> String {
        if self.use_color {
            id.bold().to_string()
        } else {
            id.to_string()
        }
    }

    fn render<T: Tabled>(rows: Vec<T>) -> String {
        let mut table = Table::new(rows);
        table.with(Style::psql());
        table.to_string()
    }
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

#[derive(Tabled)]
struct SearchRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "URL")]
    url: String,
}

#[derive(Tabled)]
struct LookupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Login")]
    login: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl OutputFormat for TableFormatter {
    fn format_issues(&self, issues: &[Issue]) -> Result<String> {
        let rows: Vec<IssueRow> = issues
            .iter()
            .map(|issue| IssueRow {
                id: self.format_id(issue.id),
                subject: Self::truncate(&issue.subject, ui::SUBJECT_MAX_WIDTH),
                status: self.format_ref(issue.status.as_ref().map(|s| s.name.as_str()), "-"),
                assignee: self.format_ref(
                    issue.assigned_to.as_ref().map(|a| a.name.as_str()),
                    "Unassigned",
                ),
                updated: issue.updated_on.clone().unwrap_or_default(),
            })
            .collect();

        Ok(Self::render(rows))
    }

    fn format_issue_list(&self, response: &IssueListResponse) -> Result<String> {
        if response.issues.is_empty() {
            return Ok("No issues found.".to_string());
        }
        self.format_issues(&response.issues)
    }

    fn format_saved_issue(&self, id: Option<u32>, issue: Option<&Issue>) -> Result<String> {
        match (issue, id) {
            (Some(issue), _) => self.format_issues(std::slice::from_ref(issue)),
            (None, Some(id)) => Ok(format!("Issue #{id} updated.")),
            (None, None) => Ok("Issue saved.".to_string()),
        }
    }

    fn format_search(&self, response: &SearchResponse) -> Result<String> {
        if response.results.is_empty() {
            return Ok("No results found.".to_string());
        }

        let rows: Vec<SearchRow> = response
            .results
            .iter()
            .map(|result| SearchRow {
                id: self.format_id(result.id),
                kind: result.kind.clone(),
                title: Self::truncate(&result.title, ui::TITLE_MAX_WIDTH),
                url: result.url.clone(),
            })
            .collect();

        Ok(Self::render(rows))
    }

    fn format_lookup_items(&self, items: &[LookupItem]) -> Result<String> {
        let rows: Vec<LookupRow> = items
            .iter()
            .map(|item| LookupRow {
                id: self.format_id(item.id),
                name: item.name.clone(),
            })
            .collect();

        Ok(Self::render(rows))
    }

    fn format_users(&self, users: &[User]) -> Result<String> {
        let rows: Vec<UserRow> = users
            .iter()
            .map(|user| UserRow {
                id: self.format_id(user.id),
                login: user.login.clone(),
                name: user.full_name(),
            })
            .collect();

        Ok(Self::render(rows))
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_issues(&self, issues: &[Issue]) -> Result<String> {
        self.to_json(issues)
    }

    fn format_issue_list(&self, response: &IssueListResponse) -> Result<String> {
        self.to_json(response)
    }

    fn format_saved_issue(&self, _id: Option<u32>, issue: Option<&Issue>) -> Result<String> {
        self.to_json(&json!({ "issue": issue }))
    }

    fn format_search(&self, response: &SearchResponse) -> Result<String> {
        self.to_json(response)
    }

    fn format_lookup_items(&self, items: &[LookupItem]) -> Result<String> {
        self.to_json(items)
    }

    fn format_users(&self, users: &[User]) -> Result<String> {
        self.to_json(users)
    }
}
