// ABOUTME: CLI argument definitions for Easy8 CLI application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::constants::{limits, ui};

#[derive(Parser, Debug)]
#[command(name = "easy8")]
#[command(about = "A CLI for Easy Redmine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Force colored output even when piped
    #[arg(long, global = true, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, list, search and update issues
    Issue {
        #[command(subcommand)]
        command: IssueCommands,
    },
    /// Fulltext search across issues, wiki pages, news and more
    Search(SearchArgs),
    /// List task types (trackers)
    Trackers(OutputArgs),
    /// List issue statuses
    Statuses(OutputArgs),
    /// List issue priorities
    Priorities(OutputArgs),
    /// List users
    Users(OutputArgs),
    /// List projects
    Projects(OutputArgs),
    /// Generate shell completions
    #[command(after_long_help = crate::completions::INSTALL_HELP)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: crate::completions::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// Create a new issue
    Create(CreateArgs),
    /// List issues
    List(ListArgs),
    /// List issues matching filters, resolving names to IDs
    Search(IssueSearchArgs),
    /// Update an existing issue
    Update(UpdateArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Pretty print JSON output
    #[arg(long, requires = "json")]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Maximum number of issues to fetch
    #[arg(short, long, default_value_t = limits::DEFAULT_ISSUE_LIMIT,
          value_parser = clap::value_parser!(u32).range(0..=limits::MAX_ISSUE_LIMIT))]
    pub limit: u32,

    /// Number of issues to skip
    #[arg(long)]
    pub offset: Option<u32>,

    /// Sort expression (e.g. priority:desc,updated_on)
    #[arg(long)]
    pub sort: Option<String>,

    /// Associated data to include (comma-separated, e.g. attachments,relations)
    #[arg(long)]
    pub include: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Issue subject
    #[arg(long)]
    pub subject: Option<String>,

    /// Issue description
    #[arg(long)]
    pub description: Option<String>,

    /// Project ID (defaults to defaults.project_id)
    #[arg(long)]
    pub project_id: Option<u32>,

    /// Task type (tracker) ID (defaults to defaults.tracker_id)
    #[arg(long)]
    pub tracker_id: Option<u32>,

    /// Status ID (defaults to defaults.status_id)
    #[arg(long)]
    pub status_id: Option<u32>,

    /// Priority ID (defaults to defaults.priority_id)
    #[arg(long)]
    pub priority_id: Option<u32>,

    /// Author user ID (defaults to defaults.author_id)
    #[arg(long)]
    pub author_id: Option<u32>,

    /// Assignee user ID (defaults to defaults.assigned_to_id)
    #[arg(long)]
    pub assigned_to_id: Option<u32>,

    /// Start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub due_date: Option<String>,

    /// Done ratio in percent (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=limits::MAX_DONE_RATIO))]
    pub done_ratio: Option<u8>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Free-text query
    #[arg(long)]
    pub q: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct IssueSearchArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Free-text query
    #[arg(long)]
    pub q: Option<String>,

    /// Assignee user ID
    #[arg(long)]
    pub assignee_id: Option<u32>,

    /// Assignee login or full name
    #[arg(long)]
    pub assignee: Option<String>,

    /// Status ID
    #[arg(long)]
    pub status_id: Option<u32>,

    /// Status name (case insensitive)
    #[arg(long)]
    pub status: Option<String>,

    /// Priority ID
    #[arg(long)]
    pub priority_id: Option<u32>,

    /// Priority name (case insensitive)
    #[arg(long)]
    pub priority: Option<String>,

    /// Task type (tracker) ID
    #[arg(long)]
    pub task_type_id: Option<u32>,

    /// Task type (tracker) name (case insensitive)
    #[arg(long)]
    pub task_type: Option<String>,

    /// Project ID
    #[arg(long)]
    pub project_id: Option<u32>,

    /// Project name (case insensitive)
    #[arg(long)]
    pub project: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub due_date: Option<String>,

    /// Subject filter
    #[arg(long)]
    pub subject: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Issue ID
    #[arg(long)]
    pub id: u32,

    /// New subject
    #[arg(long)]
    pub subject: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New status ID
    #[arg(long)]
    pub status_id: Option<u32>,

    /// New priority ID
    #[arg(long)]
    pub priority_id: Option<u32>,

    /// New assignee user ID
    #[arg(long)]
    pub assigned_to_id: Option<u32>,

    /// Done ratio in percent (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=limits::MAX_DONE_RATIO))]
    pub done_ratio: Option<u8>,

    /// Journal note to add
    #[arg(long)]
    pub notes: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query string
    pub query: String,

    /// Only match open issues
    #[arg(long)]
    pub open_issues: bool,

    /// Search scope
    #[arg(long)]
    pub scope: Option<u32>,

    /// Search only in issues (default: search all types)
    #[arg(long)]
    pub issues_only: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Accept only calendar dates in YYYY-MM-DD form.
pub fn parse_date(value: &str) -> Result<String, String> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, ui::DATE_FORMAT)
        .map(|date| date.format(ui::DATE_FORMAT).to_string())
        .map_err(|_| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

/// Split a comma-separated list, dropping empty parts.
pub fn split_comma(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
