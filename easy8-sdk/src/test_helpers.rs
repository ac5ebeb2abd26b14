// ABOUTME: Test helper utilities for mocking Easy Redmine API responses
// ABOUTME: Provides a recording transport double and canned JSON payloads

use http::StatusCode;
use secrecy::SecretString;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{Easy8Client, Result};

type Handler = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync>;

/// Transport double that records every request and answers from a closure.
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    handler: Handler,
}

impl RecordingTransport {
    pub fn new<F>(handler: F) -> (Self, Arc<Mutex<Vec<HttpRequest>>>)
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let transport = Self {
            requests: requests.clone(),
            handler: Box::new(handler),
        };
        (transport, requests)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

/// Recording double that sleeps before answering requests to `slow_path`.
///
/// A request is only recorded once its delay has elapsed, so a request dropped
/// mid-flight never shows up in the log.
pub struct DelayedTransport {
    inner: RecordingTransport,
    slow_path: &'static str,
    delay: Duration,
}

impl DelayedTransport {
    pub fn new<F>(
        slow_path: &'static str,
        delay: Duration,
        handler: F,
    ) -> (Self, Arc<Mutex<Vec<HttpRequest>>>)
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
    {
        let (inner, requests) = RecordingTransport::new(handler);
        let transport = Self {
            inner,
            slow_path,
            delay,
        };
        (transport, requests)
    }
}

#[async_trait]
impl Transport for DelayedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        if request.path == self.slow_path {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.send(request).await
    }
}

pub fn test_client(transport: impl Transport + 'static) -> Easy8Client {
    Easy8Client::builder()
        .api_key(SecretString::new("test-key".to_string().into_boxed_str()))
        .base_url("https://easy8.test")
        .transport(Box::new(transport))
        .build()
        .unwrap()
}

pub fn json_response(value: serde_json::Value) -> Result<HttpResponse> {
    Ok(HttpResponse::new(StatusCode::OK, value.to_string()))
}

pub fn mock_issues_response() -> serde_json::Value {
    json!({
        "issues": [
            {
                "id": 101,
                "subject": "Fix onboarding",
                "status": {"id": 1, "name": "New"},
                "assigned_to": {"id": 2, "name": "Alice Doe"},
                "updated_on": "2024-01-01T10:00:00Z"
            }
        ],
        "total_count": 1,
        "offset": 0,
        "limit": 25
    })
}

pub fn mock_issue_response(id: u32, subject: &str) -> serde_json::Value {
    json!({
        "issue": {
            "id": id,
            "subject": subject,
            "project": {"id": 1, "name": "Alpha"},
            "status": {"id": 1, "name": "New"}
        }
    })
}

pub fn mock_statuses_response() -> serde_json::Value {
    json!({
        "issue_statuses": [
            {"id": 1, "name": "New", "is_closed": false},
            {"id": 2, "name": "In Progress", "is_closed": false},
            {"id": 5, "name": "Closed", "is_closed": true}
        ]
    })
}

pub fn mock_priorities_response() -> serde_json::Value {
    json!({
        "issue_priorities": [
            {"id": 3, "name": "Normal", "is_default": true},
            {"id": 4, "name": "High", "is_default": false}
        ]
    })
}

pub fn mock_trackers_response() -> serde_json::Value {
    json!({
        "trackers": [
            {"id": 7, "name": "Task"},
            {"id": 8, "name": "Bug"}
        ]
    })
}

/// One page of `/users.json` holding a single user, as a server with `limit=1` would send.
pub fn mock_users_page(offset: u32) -> serde_json::Value {
    let user = match offset {
        0 => json!({"id": 10, "login": "alice", "firstname": "Alice", "lastname": "Doe"}),
        _ => json!({"id": 11, "login": "bob", "firstname": "Bob", "lastname": "Smith"}),
    };
    json!({"users": [user], "total_count": 2, "offset": offset, "limit": 1})
}

/// One page of `/projects.json` holding a single project.
pub fn mock_projects_page(offset: u32) -> serde_json::Value {
    let project = match offset {
        0 => json!({"id": 20, "name": "Alpha", "identifier": "alpha"}),
        _ => json!({"id": 21, "name": "Beta", "identifier": "beta"}),
    };
    json!({"projects": [project], "total_count": 2, "offset": offset, "limit": 1})
}

/// Routes lookup endpoints to the canned payloads above, paging on `offset`.
pub fn lookup_router(request: &HttpRequest) -> Result<HttpResponse> {
    let offset: u32 = request
        .query
        .get("offset")
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);

    match request.path.as_str() {
        "/issue_statuses.json" => json_response(mock_statuses_response()),
        "/enumerations/issue_priorities.json" => json_response(mock_priorities_response()),
        "/trackers.json" => json_response(mock_trackers_response()),
        "/users.json" => json_response(mock_users_page(offset)),
        "/projects.json" => json_response(mock_projects_page(offset)),
        "/issues.json" => json_response(mock_issues_response()),
        _ => Ok(HttpResponse::new(StatusCode::NOT_FOUND, "")),
    }
}
