// ABOUTME: Command handlers that turn parsed arguments into SDK calls and rendered output
// ABOUTME: Applies config defaults, required-flag checks and name resolution before any request

use anyhow::Result;
use easy8_sdk::{
    Easy8Client, Easy8Error, IssueFilter, IssueInput, NameFilter, NameFilters, SearchParams,
};
use log::debug;
use secrecy::SecretString;
use std::future::Future;

use crate::cli::{
    Commands, CreateArgs, IssueCommands, IssueSearchArgs, ListArgs, PageArgs, SearchArgs,
    UpdateArgs, split_comma,
};
use crate::cli_output::UsageError;
use crate::completions;
use crate::config::Config;
use crate::output::formatter;

/// Build the API client from resolved configuration.
pub fn build_client(config: &Config) -> Result<Easy8Client> {
    let api_key = SecretString::new(config.api_key().to_string().into_boxed_str());
    Ok(Easy8Client::new(config.base_url(), api_key)?)
}

/// Run one command and return the text to print on stdout.
pub async fn execute(
    command: Commands,
    config: &Config,
    client: &Easy8Client,
    use_color: bool,
) -> Result<String> {
    match command {
        Commands::Issue { command } => match command {
            IssueCommands::Create(args) => create_issue(client, config, args, use_color).await,
            IssueCommands::List(args) => list_issues(client, args, use_color).await,
            IssueCommands::Search(args) => search_issues(client, args, use_color).await,
            IssueCommands::Update(args) => update_issue(client, args, use_color).await,
        },
        Commands::Search(args) => search(client, args, use_color).await,
        Commands::Trackers(output) => {
            let items = client.list_trackers().await?;
            formatter(&output, use_color).format_lookup_items(&items)
        }
        Commands::Statuses(output) => {
            let items = client.list_issue_statuses().await?;
            formatter(&output, use_color).format_lookup_items(&items)
        }
        Commands::Priorities(output) => {
            let items = client.list_issue_priorities().await?;
            formatter(&output, use_color).format_lookup_items(&items)
        }
        Commands::Users(output) => {
            let users = client.list_users().await?;
            formatter(&output, use_color).format_users(&users)
        }
        Commands::Projects(output) => {
            let items = client.list_projects().await?;
            formatter(&output, use_color).format_lookup_items(&items)
        }
        Commands::Completions { shell } => completions::render(shell),
    }
}

/// Drive `work` to completion unless `cancel` finishes first.
///
/// Cancelling drops `work`, so an in-flight request is abandoned and later
/// lookups never start.
pub async fn run_cancellable<W, C>(work: W, cancel: C) -> Result<String>
where
    W: Future<Output = Result<String>>,
    C: Future,
{
    tokio::select! {
        result = work => result,
        _ = cancel => Err(Easy8Error::Cancelled.into()),
    }
}

fn required_id(flag: &str, value: Option<u32>) -> Result<u32, UsageError> {
    value
        .filter(|id| *id > 0)
        .ok_or_else(|| UsageError::new(format!("--{flag} is required")))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn page_filter(page: PageArgs, query: Option<String>) -> IssueFilter {
    IssueFilter {
        limit: Some(page.limit),
        offset: page.offset,
        sort: page.sort,
        query,
        include: page.include.as_deref().map(split_comma).unwrap_or_default(),
        ..Default::default()
    }
}

async fn create_issue(
    client: &Easy8Client,
    config: &Config,
    args: CreateArgs,
    use_color: bool,
) -> Result<String> {
    let defaults = &config.defaults;
    let subject = non_blank(args.subject).ok_or_else(|| UsageError::new("--subject is required"))?;

    let input = IssueInput {
        subject: Some(subject),
        project_id: Some(required_id(
            "project-id",
            args.project_id.or(defaults.project_id),
        )?),
        tracker_id: Some(required_id(
            "tracker-id",
            args.tracker_id.or(defaults.tracker_id),
        )?),
        status_id: Some(required_id(
            "status-id",
            args.status_id.or(defaults.status_id),
        )?),
        priority_id: Some(required_id(
            "priority-id",
            args.priority_id.or(defaults.priority_id),
        )?),
        author_id: Some(required_id(
            "author-id",
            args.author_id.or(defaults.author_id),
        )?),
        assigned_to_id: Some(required_id(
            "assigned-to-id",
            args.assigned_to_id.or(defaults.assigned_to_id),
        )?),
        description: non_blank(args.description),
        start_date: non_blank(args.start_date),
        due_date: non_blank(args.due_date),
        done_ratio: args.done_ratio,
        notes: None,
    };

    let issue = client.create_issue(&input).await?;
    formatter(&args.output, use_color).format_saved_issue(None, issue.as_ref())
}

async fn list_issues(client: &Easy8Client, args: ListArgs, use_color: bool) -> Result<String> {
    let filter = page_filter(args.page, args.q);
    let response = client.list_issues(&filter).await?;
    formatter(&args.output, use_color).format_issue_list(&response)
}

async fn search_issues(
    client: &Easy8Client,
    args: IssueSearchArgs,
    use_color: bool,
) -> Result<String> {
    let names = NameFilters {
        assignee: NameFilter::new(args.assignee_id, args.assignee),
        status: NameFilter::new(args.status_id, args.status),
        priority: NameFilter::new(args.priority_id, args.priority),
        task_type: NameFilter::new(args.task_type_id, args.task_type),
        project: NameFilter::new(args.project_id, args.project),
    };
    let resolved = client.resolve_filters(&names).await?;
    debug!("Resolved filters: {resolved:?}");

    let mut filter = IssueFilter {
        due_date: args.due_date,
        subject: args.subject,
        ..page_filter(args.page, args.q)
    };
    resolved.apply_to(&mut filter);

    if !filter.has_filter() {
        return Err(UsageError::new(
            "at least one filter is required (e.g. --q, --status, --assignee)",
        )
        .into());
    }

    let response = client.list_issues(&filter).await?;
    formatter(&args.output, use_color).format_issue_list(&response)
}

async fn update_issue(client: &Easy8Client, args: UpdateArgs, use_color: bool) -> Result<String> {
    let id = required_id("id", Some(args.id))?;

    let input = IssueInput {
        subject: non_blank(args.subject),
        description: non_blank(args.description),
        status_id: args.status_id,
        priority_id: args.priority_id,
        assigned_to_id: args.assigned_to_id,
        done_ratio: args.done_ratio,
        notes: non_blank(args.notes),
        ..Default::default()
    };

    let issue = client.update_issue(id, &input).await?;
    formatter(&args.output, use_color).format_saved_issue(Some(id), issue.as_ref())
}

async fn search(client: &Easy8Client, args: SearchArgs, use_color: bool) -> Result<String> {
    let params = SearchParams {
        query: args.query,
        open_issues: args.open_issues,
        scope: args.scope,
        issues_only: args.issues_only,
    };

    let response = client.search(&params).await?;
    formatter(&args.output, use_color).format_search(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_output::exit_code;
    use std::future::{pending, ready};

    #[test]
    fn test_required_id() {
        assert_eq!(required_id("project-id", Some(3)).unwrap(), 3);
        assert_eq!(
            required_id("project-id", Some(0)).unwrap_err().to_string(),
            "--project-id is required"
        );
        assert!(required_id("author-id", None).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" x ".to_string())), Some(" x ".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_page_filter_splits_include() {
        let page = PageArgs {
            limit: 25,
            offset: Some(50),
            sort: Some("id:desc".to_string()),
            include: Some("attachments, relations,".to_string()),
        };

        let filter = page_filter(page, None);
        assert_eq!(filter.limit, Some(25));
        assert_eq!(filter.offset, Some(50));
        assert_eq!(filter.include, vec!["attachments", "relations"]);
        assert!(!filter.has_filter());
    }

    #[test]
    fn test_build_client_uses_config() {
        let config = Config {
            base_url: Some("https://redmine.example.com/".to_string()),
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        let client = build_client(&config).unwrap();
        assert_eq!(client.base_url(), "https://redmine.example.com");

        let bad = Config {
            base_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(build_client(&bad).is_err());
    }

    #[tokio::test]
    async fn test_cancel_abandons_pending_work() {
        let err = run_cancellable(pending::<Result<String>>(), ready(()))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Easy8Error>(),
            Some(Easy8Error::Cancelled)
        ));
        assert_eq!(err.to_string(), "Operation cancelled");
        assert_eq!(exit_code(&err), 1);
    }

    #[tokio::test]
    async fn test_finished_work_is_returned() {
        let output = run_cancellable(async { Ok("done".to_string()) }, pending::<()>())
            .await
            .unwrap();
        assert_eq!(output, "done");
    }
}
