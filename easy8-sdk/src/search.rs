// ABOUTME: Fulltext search across issues and other records
// ABOUTME: Wraps GET /search.json

use crate::constants::{paths, search_params};
use crate::query::QueryParams;
use crate::types::SearchResponse;
use crate::{Easy8Client, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    /// Only match open issues
    pub open_issues: bool,
    pub scope: Option<u32>,
    /// Search issues only, skipping wiki pages, news and the rest
    pub issues_only: bool,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set(search_params::QUERY, self.query.as_str());

        if self.open_issues {
            query.set(search_params::OPEN_ISSUES, "1");
        }
        if let Some(scope) = self.scope.filter(|scope| *scope > 0) {
            query.set(search_params::SCOPE, scope.to_string());
        }
        if self.issues_only {
            query.set(search_params::ISSUES_ONLY, "1");
        }

        query
    }
}

impl Easy8Client {
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        self.get_json(paths::SEARCH, params.to_query()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{RecordingTransport, json_response, test_client};
    use serde_json::json;

    #[test]
    fn test_plain_query_only_sends_q() {
        let query = SearchParams::new("hello").to_query();

        assert_eq!(query.len(), 1);
        assert_eq!(query.get("q"), Some("hello"));
    }

    #[test]
    fn test_zero_scope_is_omitted() {
        let params = SearchParams {
            scope: Some(0),
            ..SearchParams::new("hello")
        };
        assert!(!params.to_query().contains_key("scope"));
    }

    #[tokio::test]
    async fn test_search_sends_all_flags() {
        let (transport, requests) = RecordingTransport::new(|_| {
            json_response(json!({
                "results": [{
                    "id": 5,
                    "type": "issue",
                    "title": "Hello",
                    "url": "https://example.com",
                    "description": "",
                    "datetime": "2024-01-01"
                }],
                "total_count": 1,
                "offset": 0,
                "limit": 25
            }))
        });
        let client = test_client(transport);

        let params = SearchParams {
            query: "hello".to_string(),
            open_issues: true,
            scope: Some(7),
            issues_only: true,
        };
        let response = client.search(&params).await.unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, 5);
        assert_eq!(response.results[0].kind, "issue");

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].path, "/search.json");
        let query = &requests[0].query;
        assert_eq!(query.get("q"), Some("hello"));
        assert_eq!(query.get("open_issues"), Some("1"));
        assert_eq!(query.get("scope"), Some("7"));
        assert_eq!(query.get("issues"), Some("1"));
    }
}
