// ABOUTME: Easy8 SDK library: typed client for the Easy Redmine REST API
// ABOUTME: Request dispatch, filter building, lookup pagination and name resolution

use http::Method;
use log::debug;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

pub mod builder;
pub mod constants;
pub mod error;
pub mod issues;
pub mod lookups;
pub mod query;
pub mod resolve;
pub mod search;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_helpers;

pub use builder::Easy8ClientConfig;
pub use error::Easy8Error;
pub use issues::IssueFilter;
pub use lookups::PageCursor;
pub use query::QueryParams;
pub use resolve::{Candidate, Dimension, NameFilter, NameFilters, Resolution, ResolvedFilters};
pub use search::SearchParams;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::{
    Issue, IssueInput, IssueListResponse, LookupItem, NamedRef, SearchResponse, SearchResult,
    User,
};

pub type Result<T> = std::result::Result<T, Easy8Error>;

/// Client for one Easy Redmine instance.
///
/// Every call is a fresh round trip (or a short sequence of them for paginated
/// lookups); nothing is cached between calls.
pub struct Easy8Client {
    base_url: String,
    api_key: SecretString,
    transport: Box<dyn Transport>,
}

impl Easy8Client {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Result<Self> {
        Self::builder().api_key(api_key).base_url(base_url).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and decode the JSON body.
    ///
    /// Returns `Ok(None)` for a 2xx response with an empty body.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: QueryParams,
        body: Option<serde_json::Value>,
    ) -> Result<Option<T>> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(Easy8Error::MissingApiKey);
        }

        let url = format!("{}{}", self.base_url, path);
        if query.is_empty() {
            debug!("{method} {path}");
        } else {
            debug!("{method} {path}?{query}");
        }

        let request = HttpRequest {
            method,
            url: url.clone(),
            path: path.to_string(),
            query,
            body,
            api_key: self.api_key.clone(),
        };
        let response = self.transport.send(request).await?;

        if !response.status.is_success() {
            let body = String::from_utf8_lossy(&response.body).trim().to_string();
            debug!("{path} failed with status {}", response.status.as_u16());
            return Err(Easy8Error::Api {
                status: response.status.as_u16(),
                body,
                url,
            });
        }

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&response.body)?))
    }

    /// GET a resource, treating an empty 2xx body as the type's default.
    pub(crate) async fn get_json<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: QueryParams,
    ) -> Result<T> {
        Ok(self
            .request_json(Method::GET, path, query, None)
            .await?
            .unwrap_or_default())
    }
}
