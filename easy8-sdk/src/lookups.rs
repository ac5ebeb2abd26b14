// ABOUTME: Reference lists (trackers, statuses, priorities, users, projects)
// ABOUTME: Users and projects are paged; pages are fetched in order until the total is reached

use log::{debug, warn};

use crate::constants::{paging, params, paths};
use crate::query::QueryParams;
use crate::types::{
    IssuePriorityListResponse, IssueStatusListResponse, LookupItem, ProjectListResponse,
    TrackerListResponse, User, UserListResponse,
};
use crate::{Easy8Client, Result};

/// Position within an offset/limit paged listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub offset: u32,
    pub limit: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(paging::PAGE_SIZE)
    }
}

impl PageCursor {
    pub fn new(limit: u32) -> Self {
        Self { offset: 0, limit }
    }

    pub fn query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set(params::LIMIT, self.limit.to_string());
        query.set(params::OFFSET, self.offset.to_string());
        query
    }

    /// Move past a received page and report whether another one should be requested.
    ///
    /// The offset moves by the limit the server reports, which may be smaller
    /// than the one requested. A reported limit of 0 ends the listing.
    pub fn advance(&mut self, reported_limit: u32, total_count: u32) -> bool {
        if reported_limit == 0 {
            return false;
        }

        self.offset = self.offset.saturating_add(reported_limit);
        self.offset < total_count
    }
}

pub(crate) trait PagedResponse {
    type Item;

    fn total_count(&self) -> u32;
    fn reported_limit(&self) -> u32;
    fn into_items(self) -> Vec<Self::Item>;
}

impl PagedResponse for UserListResponse {
    type Item = User;

    fn total_count(&self) -> u32 {
        self.total_count
    }

    fn reported_limit(&self) -> u32 {
        self.limit
    }

    fn into_items(self) -> Vec<User> {
        self.users
    }
}

impl PagedResponse for ProjectListResponse {
    type Item = LookupItem;

    fn total_count(&self) -> u32 {
        self.total_count
    }

    fn reported_limit(&self) -> u32 {
        self.limit
    }

    fn into_items(self) -> Vec<LookupItem> {
        self.projects
    }
}

impl Easy8Client {
    async fn paginate<R>(&self, path: &str) -> Result<Vec<R::Item>>
    where
        R: PagedResponse + serde::de::DeserializeOwned + Default,
    {
        let mut cursor = PageCursor::default();
        let mut items = Vec::new();

        loop {
            let page: R = self.get_json(path, cursor.query()).await?;
            let total_count = page.total_count();
            let reported_limit = page.reported_limit();
            debug!(
                "{path}: page at offset {} (limit {reported_limit}, total {total_count})",
                cursor.offset
            );

            items.extend(page.into_items());

            if !cursor.advance(reported_limit, total_count) {
                if reported_limit == 0 && cursor.offset < total_count {
                    warn!(
                        "{path}: server reported limit 0 at offset {}, stopping with {} of {total_count} items",
                        cursor.offset,
                        items.len()
                    );
                }
                break;
            }
        }

        Ok(items)
    }

    pub async fn list_trackers(&self) -> Result<Vec<LookupItem>> {
        let response: TrackerListResponse =
            self.get_json(paths::TRACKERS, QueryParams::new()).await?;
        Ok(response.trackers)
    }

    pub async fn list_issue_statuses(&self) -> Result<Vec<LookupItem>> {
        let response: IssueStatusListResponse = self
            .get_json(paths::ISSUE_STATUSES, QueryParams::new())
            .await?;
        Ok(response.issue_statuses)
    }

    pub async fn list_issue_priorities(&self) -> Result<Vec<LookupItem>> {
        let response: IssuePriorityListResponse = self
            .get_json(paths::ISSUE_PRIORITIES, QueryParams::new())
            .await?;
        Ok(response.issue_priorities)
    }

    /// All users, across every page.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.paginate::<UserListResponse>(paths::USERS).await
    }

    /// All projects, across every page.
    pub async fn list_projects(&self) -> Result<Vec<LookupItem>> {
        self.paginate::<ProjectListResponse>(paths::PROJECTS).await
    }
}
