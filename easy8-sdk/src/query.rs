// ABOUTME: String-keyed multi-value query parameter set used for every GET request
// ABOUTME: Deterministic iteration order so encoded URLs and logs are stable

use std::collections::BTreeMap;
use std::fmt;

/// Query parameters ready for URL encoding.
///
/// Keys may carry several values; ordering between keys is not meaningful to the
/// service, but iteration is sorted so encoding is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value stored under `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), vec![value.into()]);
    }

    /// Add `value` to the values stored under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flattened `(key, value)` pairs, one per value.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.values
            .iter()
            .flat_map(|(key, values)| {
                values
                    .iter()
                    .map(move |value| (key.as_str(), value.as_str()))
            })
            .collect()
    }

    /// `application/x-www-form-urlencoded` rendering without the leading `?`.
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_existing_values() {
        let mut params = QueryParams::new();
        params.append("set_filter", "0");
        params.append("set_filter", "1");
        params.set("set_filter", "1");

        assert_eq!(params.get_all("set_filter"), ["1".to_string()]);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_append_keeps_multiple_values() {
        let mut params = QueryParams::new();
        params.append("include", "attachments");
        params.append("include", "relations");

        assert_eq!(params.get("include"), Some("attachments"));
        assert_eq!(params.get_all("include").len(), 2);
        assert_eq!(params.pairs().len(), 2);
    }

    #[test]
    fn test_encode_is_sorted_and_escaped() {
        let params: QueryParams = [("sort", "priority:desc"), ("limit", "10"), ("q", "a b&c")]
            .into_iter()
            .collect();

        assert_eq!(params.encode(), "limit=10&q=a+b%26c&sort=priority%3Adesc");
        assert_eq!(params.to_string(), params.encode());
    }

    #[test]
    fn test_empty() {
        let params = QueryParams::new();
        assert!(params.is_empty());
        assert_eq!(params.get("limit"), None);
        assert!(params.get_all("limit").is_empty());
        assert_eq!(params.encode(), "");
    }
}
