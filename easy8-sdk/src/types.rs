// ABOUTME: Wire types for Easy Redmine issues, search results and lookup lists
// ABOUTME: Request payloads serialize sparsely; responses tolerate missing fields

use serde::{Deserialize, Serialize};

/// An `{id, name}` pair from a reference list (trackers, statuses, priorities, projects).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupItem {
    pub id: u32,
    pub name: String,
}

/// Reference to a related record embedded in an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
}

impl User {
    /// "firstname lastname", trimmed when either part is missing.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u32,
    #[serde(default)]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_ratio: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracker: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<NamedRef>,
}

/// Sparse field set for creating or updating an issue.
///
/// `None` fields are left out of the JSON body entirely so the server keeps their
/// current values; `Some(String::new())` is sent as an explicit empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_ratio: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// `{"issue": {...}}` envelope expected by create and update.
#[derive(Debug, Clone, Serialize)]
pub struct IssueRequest<'a> {
    pub issue: &'a IssueInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueResponse {
    pub issue: Issue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueListResponse {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub datetime: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TrackerListResponse {
    #[serde(default)]
    pub trackers: Vec<LookupItem>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct IssueStatusListResponse {
    #[serde(default)]
    pub issue_statuses: Vec<LookupItem>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct IssuePriorityListResponse {
    #[serde(default)]
    pub issue_priorities: Vec<LookupItem>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserListResponse {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectListResponse {
    #[serde(default)]
    pub projects: Vec<LookupItem>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub limit: u32,
}
