// ABOUTME: Custom error types for the Easy8 SDK with user-friendly messages
// ABOUTME: Separates precondition, transport, service, decode and name resolution failures

use crate::resolve::Dimension;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Easy8Error {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Missing {0} id")]
    MissingId(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: request took too long to complete")]
    Timeout,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{}", api_message(.status, .body))]
    Api {
        status: u16,
        body: String,
        url: String,
    },

    #[error("Invalid API response: {0}")]
    Decode(String),

    #[error("{dimension} not found: {name}")]
    NotFound { dimension: Dimension, name: String },

    #[error("{dimension} matches multiple entries: {name}")]
    Ambiguous { dimension: Dimension, name: String },

    #[error("{dimension}-id does not match {dimension} name")]
    Conflict { dimension: Dimension },
}

fn api_message(status: &u16, body: &str) -> String {
    if body.is_empty() {
        format!("API error {status}")
    } else {
        format!("API error {status}: {body}")
    }
}

impl Easy8Error {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            Easy8Error::MissingApiKey => Some(
                "Set EASY8_API_KEY or add api_key to ~/.config/easy8/config.toml.\nYour key is under \"My account\" in Easy Redmine.",
            ),
            Easy8Error::Network(_) => Some("Check your internet connection and EASY8_BASE_URL"),
            Easy8Error::Timeout => Some("Try again or check your network connection"),
            Easy8Error::Api { status: 401, .. } => Some("The API key was rejected by the server"),
            Easy8Error::Api { status: 403, .. } => {
                Some("Your account is not allowed to perform this action")
            }
            Easy8Error::NotFound { dimension, .. } | Easy8Error::Ambiguous { dimension, .. } => {
                Some(match dimension {
                    Dimension::Assignee => "Run `easy8 users` to see logins and names",
                    Dimension::Status => "Run `easy8 statuses` to see available statuses",
                    Dimension::Priority => "Run `easy8 priorities` to see available priorities",
                    Dimension::TaskType => "Run `easy8 trackers` to see available task types",
                    Dimension::Project => "Run `easy8 projects` to see available projects",
                })
            }
            Easy8Error::Conflict { .. } => Some("Pass either the name or the id, or make them agree"),
            _ => None,
        }
    }

    /// Errors caused by the invocation itself rather than by the remote service.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Easy8Error::MissingId(_)
                | Easy8Error::NotFound { .. }
                | Easy8Error::Ambiguous { .. }
                | Easy8Error::Conflict { .. }
        )
    }
}

impl From<reqwest::Error> for Easy8Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Easy8Error::Timeout
        } else if err.is_decode() {
            Easy8Error::Decode(err.to_string())
        } else {
            Easy8Error::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Easy8Error {
    fn from(err: serde_json::Error) -> Self {
        Easy8Error::Decode(err.to_string())
    }
}
