// ABOUTME: Centralized constants for the Easy8 CLI application
// ABOUTME: Contains limits, config locations, environment variable names and display widths

/// Default limits for issue queries
pub mod limits {
    pub const DEFAULT_ISSUE_LIMIT: u32 = 25;
    /// Largest page the server will return
    pub const MAX_ISSUE_LIMIT: i64 = 100;
    pub const MAX_DONE_RATIO: i64 = 100;
}

/// Configuration file locations
pub mod config {
    pub const DIR_NAME: &str = "easy8";
    pub const FILE_NAME: &str = "config.toml";
    /// Per-directory config file, highest file precedence
    pub const PROJECT_FILE_NAME: &str = "easy8.toml";
}

/// Environment variables that override file configuration
pub mod env {
    pub const BASE_URL: &str = "EASY8_BASE_URL";
    pub const API_KEY: &str = "EASY8_API_KEY";
    pub const DEFAULT_PROJECT_ID: &str = "EASY8_DEFAULT_PROJECT_ID";
    pub const DEFAULT_TRACKER_ID: &str = "EASY8_DEFAULT_TRACKER_ID";
    pub const DEFAULT_STATUS_ID: &str = "EASY8_DEFAULT_STATUS_ID";
    pub const DEFAULT_PRIORITY_ID: &str = "EASY8_DEFAULT_PRIORITY_ID";
    pub const DEFAULT_AUTHOR_ID: &str = "EASY8_DEFAULT_AUTHOR_ID";
    pub const DEFAULT_ASSIGNED_TO_ID: &str = "EASY8_DEFAULT_ASSIGNED_TO_ID";
}

/// UI and formatting constants
pub mod ui {
    /// Characters of an issue subject shown in tables
    pub const SUBJECT_MAX_WIDTH: usize = 50;
    /// Characters of a search result title shown in tables
    pub const TITLE_MAX_WIDTH: usize = 60;
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_ERROR: i32 = 1;
    pub const USAGE_ERROR: i32 = 2;
}
