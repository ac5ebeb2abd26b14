// ABOUTME: Resolves human-readable names to numeric IDs for the issue filter dimensions
// ABOUTME: One generic routine serves every dimension; lookups happen only when a name is given

use std::borrow::Cow;
use std::fmt;
use std::future::Future;

use log::debug;

use crate::error::Easy8Error;
use crate::issues::IssueFilter;
use crate::types::{LookupItem, User};
use crate::{Easy8Client, Result};

/// A filter dimension that accepts either an ID or a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Assignee,
    Status,
    Priority,
    TaskType,
    Project,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Assignee => "assignee",
            Dimension::Status => "status",
            Dimension::Priority => "priority",
            Dimension::TaskType => "task-type",
            Dimension::Project => "project",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something a name can be matched against.
pub trait Candidate {
    fn id(&self) -> u32;

    /// Every name this candidate answers to.
    fn names(&self) -> Vec<Cow<'_, str>>;
}

impl Candidate for LookupItem {
    fn id(&self) -> u32 {
        self.id
    }

    fn names(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.name)]
    }
}

/// Users match on login or on "firstname lastname".
impl Candidate for User {
    fn id(&self) -> u32 {
        self.id
    }

    fn names(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.login), Cow::Owned(self.full_name())]
    }
}

/// Outcome of resolving one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Neither an ID nor a name was given
    #[default]
    Unset,
    /// Only an ID was given; it is passed through unchecked
    Explicit(u32),
    /// A name matched exactly one candidate; `name` is kept as typed
    Named { id: u32, name: String },
}

impl Resolution {
    pub fn id(&self) -> Option<u32> {
        match self {
            Resolution::Unset => None,
            Resolution::Explicit(id) => Some(*id),
            Resolution::Named { id, .. } => Some(*id),
        }
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// IDs of every candidate with a name equal to `name` after normalization.
pub fn match_name<C: Candidate>(candidates: &[C], name: &str) -> Vec<u32> {
    let wanted = normalize_name(name);

    candidates
        .iter()
        .filter(|candidate| {
            candidate
                .names()
                .iter()
                .any(|candidate_name| normalize_name(candidate_name) == wanted)
        })
        .map(Candidate::id)
        .collect()
}

/// Resolve one dimension.
///
/// `fetch` is only awaited when `name` is non-blank. A blank name passes
/// `explicit_id` through as given.
pub async fn resolve<C, F, Fut>(
    dimension: Dimension,
    explicit_id: Option<u32>,
    name: Option<&str>,
    fetch: F,
) -> Result<Resolution>
where
    C: Candidate,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<C>>>,
{
    let name = match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Ok(explicit_id.map_or(Resolution::Unset, Resolution::Explicit)),
    };

    let candidates = fetch().await?;
    let matches = match_name(&candidates, name);

    let id = match matches.as_slice() {
        [] => {
            return Err(Easy8Error::NotFound {
                dimension,
                name: name.to_string(),
            });
        }
        [id] => *id,
        _ => {
            return Err(Easy8Error::Ambiguous {
                dimension,
                name: name.to_string(),
            });
        }
    };

    if explicit_id.is_some_and(|explicit| explicit != id) {
        return Err(Easy8Error::Conflict { dimension });
    }

    debug!("Resolved {dimension} '{name}' to id {id}");
    Ok(Resolution::Named {
        id,
        name: name.to_string(),
    })
}

/// ID and/or name supplied for one dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
}

impl NameFilter {
    pub fn new(id: Option<u32>, name: Option<String>) -> Self {
        Self { id, name }
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilters {
    pub assignee: NameFilter,
    pub status: NameFilter,
    pub priority: NameFilter,
    pub task_type: NameFilter,
    pub project: NameFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFilters {
    pub assignee: Resolution,
    pub status: Resolution,
    pub priority: Resolution,
    pub task_type: Resolution,
    pub project: Resolution,
}

impl ResolvedFilters {
    /// Copy the resolved IDs into `filter`, leaving unset dimensions untouched.
    pub fn apply_to(&self, filter: &mut IssueFilter) {
        let targets = [
            (&self.assignee, &mut filter.assignee_id),
            (&self.status, &mut filter.status_id),
            (&self.priority, &mut filter.priority_id),
            (&self.task_type, &mut filter.task_type_id),
            (&self.project, &mut filter.project_id),
        ];

        for (resolution, target) in targets {
            if let Some(id) = resolution.id() {
                *target = Some(id);
            }
        }
    }
}

impl Easy8Client {
    /// Resolve all five dimensions in order. The first failure stops the rest.
    pub async fn resolve_filters(&self, filters: &NameFilters) -> Result<ResolvedFilters> {
        let assignee = resolve(
            Dimension::Assignee,
            filters.assignee.id,
            filters.assignee.name(),
            || self.list_users(),
        )
        .await?;
        let status = resolve(
            Dimension::Status,
            filters.status.id,
            filters.status.name(),
            || self.list_issue_statuses(),
        )
        .await?;
        let priority = resolve(
            Dimension::Priority,
            filters.priority.id,
            filters.priority.name(),
            || self.list_issue_priorities(),
        )
        .await?;
        let task_type = resolve(
            Dimension::TaskType,
            filters.task_type.id,
            filters.task_type.name(),
            || self.list_trackers(),
        )
        .await?;
        let project = resolve(
            Dimension::Project,
            filters.project.id,
            filters.project.name(),
            || self.list_projects(),
        )
        .await?;

        Ok(ResolvedFilters {
            assignee,
            status,
            priority,
            task_type,
            project,
        })
    }
}
