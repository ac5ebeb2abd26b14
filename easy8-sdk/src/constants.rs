// ABOUTME: Centralized constants for the Easy8 SDK
// ABOUTME: Contains endpoint paths, paging limits, headers and timeouts

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for a single HTTP round trip
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Easy Redmine URLs
pub mod urls {
    /// Base URL used when neither config nor environment provide one
    pub const DEFAULT_BASE_URL: &str = "https://demo.easysoftware.com";
}

/// HTTP headers
pub mod headers {
    /// Credential header sent on every request
    pub const API_KEY: &str = "X-Redmine-API-Key";

    pub const USER_AGENT: &str = concat!("easy8-cli/", env!("CARGO_PKG_VERSION"));
}

/// REST endpoint paths, relative to the base URL
pub mod paths {
    pub const ISSUES: &str = "/issues.json";
    pub const SEARCH: &str = "/search.json";
    pub const TRACKERS: &str = "/trackers.json";
    pub const ISSUE_STATUSES: &str = "/issue_statuses.json";
    pub const ISSUE_PRIORITIES: &str = "/enumerations/issue_priorities.json";
    pub const USERS: &str = "/users.json";
    pub const PROJECTS: &str = "/projects.json";

    pub fn issue(id: u32) -> String {
        format!("/issues/{id}.json")
    }
}

/// Paging for aggregated lookup lists
pub mod paging {
    /// Page size requested from paginated endpoints (server maximum)
    pub const PAGE_SIZE: u32 = 100;
}

/// Query parameter names understood by the issue listing endpoint
pub mod params {
    pub const LIMIT: &str = "limit";
    pub const OFFSET: &str = "offset";
    pub const SORT: &str = "sort";
    pub const SET_FILTER: &str = "set_filter";
    pub const QUERY: &str = "easy_query_q";
    pub const ASSIGNED_TO_ID: &str = "assigned_to_id";
    pub const DUE_DATE: &str = "due_date";
    pub const STATUS_ID: &str = "status_id";
    pub const PRIORITY_ID: &str = "priority_id";
    pub const SUBJECT: &str = "subject";
    pub const TRACKER_ID: &str = "tracker_id";
    pub const PROJECT_ID: &str = "project_id";
    pub const INCLUDE: &str = "include";
}

/// Query parameter names understood by the fulltext search endpoint
pub mod search_params {
    pub const QUERY: &str = "q";
    pub const OPEN_ISSUES: &str = "open_issues";
    pub const SCOPE: &str = "scope";
    pub const ISSUES_ONLY: &str = "issues";
}
