// ABOUTME: Issue listing filters and create/update requests
// ABOUTME: Converts sparse filter specs into the exact query parameters the listing endpoint expects

use http::Method;
use log::debug;
use typed_builder::TypedBuilder;

use crate::constants::{params, paths};
use crate::error::Easy8Error;
use crate::query::QueryParams;
use crate::types::{Issue, IssueInput, IssueListResponse, IssueRequest, IssueResponse};
use crate::{Easy8Client, Result};

/// Filter and paging options for `GET /issues.json`.
///
/// Every field is optional. IDs of zero and blank strings count as absent, so a
/// resolved-but-empty dimension adds nothing to the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct IssueFilter {
    #[builder(default, setter(strip_option))]
    pub limit: Option<u32>,
    #[builder(default, setter(strip_option))]
    pub offset: Option<u32>,
    #[builder(default, setter(strip_option, into))]
    pub sort: Option<String>,
    /// Free-text query (`easy_query_q`)
    #[builder(default, setter(strip_option, into))]
    pub query: Option<String>,
    #[builder(default)]
    pub include: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub assignee_id: Option<u32>,
    #[builder(default, setter(strip_option, into))]
    pub due_date: Option<String>,
    #[builder(default, setter(strip_option))]
    pub status_id: Option<u32>,
    #[builder(default, setter(strip_option))]
    pub priority_id: Option<u32>,
    #[builder(default, setter(strip_option, into))]
    pub subject: Option<String>,
    /// Tracker, called "task type" in the Easy Redmine UI
    #[builder(default, setter(strip_option))]
    pub task_type_id: Option<u32>,
    #[builder(default, setter(strip_option))]
    pub project_id: Option<u32>,
}

fn present_id(id: Option<u32>) -> Option<u32> {
    id.filter(|id| *id > 0)
}

fn present_text(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

impl IssueFilter {
    /// Semantic filter parameters, excluding free text, paging, sort and include.
    fn field_filters(&self) -> Vec<(&'static str, String)> {
        let ids = [
            (params::ASSIGNED_TO_ID, self.assignee_id),
            (params::STATUS_ID, self.status_id),
            (params::PRIORITY_ID, self.priority_id),
            (params::TRACKER_ID, self.task_type_id),
            (params::PROJECT_ID, self.project_id),
        ];
        let texts = [
            (params::DUE_DATE, &self.due_date),
            (params::SUBJECT, &self.subject),
        ];

        let ids = ids
            .into_iter()
            .filter_map(|(key, id)| present_id(id).map(|id| (key, id.to_string())));
        let texts = texts
            .into_iter()
            .filter_map(|(key, text)| present_text(text).map(|text| (key, text.to_string())));

        ids.chain(texts).collect()
    }

    /// Whether any filter (free text or field) is active.
    pub fn has_filter(&self) -> bool {
        present_text(&self.query).is_some() || !self.field_filters().is_empty()
    }

    /// Build the query parameters for the listing endpoint.
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        let mut has_filter = false;

        if let Some(limit) = present_id(self.limit) {
            query.set(params::LIMIT, limit.to_string());
        }
        if let Some(offset) = present_id(self.offset) {
            query.set(params::OFFSET, offset.to_string());
        }
        if let Some(sort) = present_text(&self.sort) {
            query.set(params::SORT, sort);
        }
        if let Some(text) = present_text(&self.query) {
            query.set(params::SET_FILTER, "1");
            query.set(params::QUERY, text);
            has_filter = true;
        }
        for (key, value) in self.field_filters() {
            query.set(key, value);
            has_filter = true;
        }
        if has_filter {
            query.set(params::SET_FILTER, "1");
        }
        if !self.include.is_empty() {
            query.set(params::INCLUDE, self.include.join(","));
        }

        query
    }
}

impl Easy8Client {
    pub async fn list_issues(&self, filter: &IssueFilter) -> Result<IssueListResponse> {
        self.get_json(paths::ISSUES, filter.to_query()).await
    }

    /// Create an issue. Returns `None` when the server answers without a body.
    pub async fn create_issue(&self, input: &IssueInput) -> Result<Option<Issue>> {
        let body = serde_json::to_value(IssueRequest { issue: input })?;
        let response: Option<IssueResponse> = self
            .request_json(Method::POST, paths::ISSUES, QueryParams::new(), Some(body))
            .await?;

        if let Some(response) = &response {
            debug!("Created issue #{}", response.issue.id);
        }
        Ok(response.map(|response| response.issue))
    }

    /// Update issue `id`. Redmine answers `204 No Content`, which yields `None`.
    pub async fn update_issue(&self, id: u32, input: &IssueInput) -> Result<Option<Issue>> {
        if id == 0 {
            return Err(Easy8Error::MissingId("issue"));
        }

        let body = serde_json::to_value(IssueRequest { issue: input })?;
        let response: Option<IssueResponse> = self
            .request_json(Method::PUT, &paths::issue(id), QueryParams::new(), Some(body))
            .await?;

        Ok(response.map(|response| response.issue))
    }
}
