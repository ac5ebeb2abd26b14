// ABOUTME: HTTP transport abstraction used by the request dispatcher
// ABOUTME: Production implementation on reqwest; tests plug in recording doubles

use async_trait::async_trait;
use http::{Method, StatusCode};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::constants::headers;
use crate::error::Easy8Error;
use crate::query::QueryParams;
use crate::Result;

/// One outbound request, fully described.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Path relative to the base URL, kept for logging and test assertions
    pub path: String,
    pub query: QueryParams,
    pub body: Option<serde_json::Value>,
    pub api_key: SecretString,
}

/// Raw status and body of a completed round trip.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Executes HTTP round trips. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(headers::USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Easy8Error::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut api_key = HeaderValue::from_str(request.api_key.expose_secret())
            .map_err(|_| Easy8Error::Configuration("API key contains invalid characters".into()))?;
        api_key.set_sensitive(true);

        let mut builder = self
            .client
            .request(request.method, request.url.as_str())
            .header(headers::API_KEY, api_key);

        if !request.query.is_empty() {
            builder = builder.query(&request.query.pairs());
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
